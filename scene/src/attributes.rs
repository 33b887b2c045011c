use std::collections::HashMap;

use common::color::SRgb;

use crate::SceneError;

/// Display attributes for the sub-meshes of a scene, stored as parallel
/// arrays and looked up by sub-mesh name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeTable {
    names: Vec<String>,
    values: Vec<f32>,
    colors: Vec<SRgb<f32>>,
    edge_colors: Vec<SRgb<f32>>,

    lookup: HashMap<String, usize>,
}

/// One row of an [`AttributeTable`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attribute<'a> {
    pub name: &'a str,
    pub value: f32,
    pub color: SRgb<f32>,
    pub edge_color: SRgb<f32>,
}

impl AttributeTable {
    /// Builds a table, checking that all arrays have the same length and
    /// that names are unique.
    pub fn new(
        names: Vec<String>,
        values: Vec<f32>,
        colors: Vec<SRgb<f32>>,
        edge_colors: Vec<SRgb<f32>>,
    ) -> Result<Self, SceneError> {
        let len = names.len();
        if values.len() != len || colors.len() != len || edge_colors.len() != len {
            return Err(SceneError::InvalidAttributeTable {
                reason: format!(
                    "array lengths differ (names: {len}, values: {}, colors: {}, edge colors: {})",
                    values.len(),
                    colors.len(),
                    edge_colors.len()
                ),
            });
        }

        let lookup = build_lookup(&names, HashMap::with_capacity(len))?;
        Ok(Self {
            names,
            values,
            colors,
            edge_colors,
            lookup,
        })
    }

    /// Appends the rows of `other`. Fails without modifying `self` if a name
    /// is already present.
    pub fn append(&mut self, other: AttributeTable) -> Result<(), SceneError> {
        let offset = self.len();
        let mut lookup = self.lookup.clone();
        for (idx, name) in other.names.iter().enumerate() {
            if lookup.insert(name.clone(), offset + idx).is_some() {
                return Err(duplicate_name(name));
            }
        }

        self.lookup = lookup;
        self.names.extend(other.names);
        self.values.extend(other.values);
        self.colors.extend(other.colors);
        self.edge_colors.extend(other.edge_colors);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.lookup.get(name).copied()
    }

    pub fn get(&self, index: usize) -> Option<Attribute<'_>> {
        Some(Attribute {
            name: self.names.get(index)?,
            value: *self.values.get(index)?,
            color: *self.colors.get(index)?,
            edge_color: *self.edge_colors.get(index)?,
        })
    }

    pub fn by_name(&self, name: &str) -> Option<Attribute<'_>> {
        self.get(self.index_of(name)?)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn colors(&self) -> &[SRgb<f32>] {
        &self.colors
    }

    pub fn edge_colors(&self) -> &[SRgb<f32>] {
        &self.edge_colors
    }
}

fn build_lookup(
    names: &[String],
    mut lookup: HashMap<String, usize>,
) -> Result<HashMap<String, usize>, SceneError> {
    for (idx, name) in names.iter().enumerate() {
        if lookup.insert(name.clone(), idx).is_some() {
            return Err(duplicate_name(name));
        }
    }
    Ok(lookup)
}

fn duplicate_name(name: &str) -> SceneError {
    SceneError::InvalidAttributeTable {
        reason: format!("duplicate name `{name}`"),
    }
}
