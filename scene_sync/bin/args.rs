use std::{path::PathBuf, str::FromStr};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use nalgebra::{ArrayStorage, Const, Matrix, Scalar, SVector, U1};
use num_traits::Zero;

#[derive(Debug, Parser)]
/// Builds a demo cube grid, runs it through a scene synchronizer and prints
/// the resulting frame as JSON.
pub struct Args {
    #[arg(short, long, default_value_t = 10)]
    /// Number of cubes along each axis.
    pub grid: usize,
    #[arg(long, default_value_t = 1.0)]
    /// Distance between neighboring cube centers.
    pub spacing: f32,
    #[arg(long, value_enum, default_value_t = Kind::MultiBlock)]
    /// How the cubes are stored.
    pub kind: Kind,
    #[arg(long, value_parser = vector_value_parser::<f32, 16>)]
    /// Column-major 4x4 pose of the slice tool, as 16 comma separated
    /// numbers. The translation is the plane origin and the second column is
    /// its normal.
    pub clip: Option<SVector<f32, 16>>,
    #[arg(long, default_value_t = 0.2)]
    /// Amount subtracted from each color channel to get the edge colors.
    pub edge_darken: f32,

    #[arg(long)]
    /// Path to a TOML config file. Defaults are used if it does not exist.
    pub config: Option<PathBuf>,
    #[arg(long)]
    /// Pretty-print the JSON output.
    pub pretty: bool,
    #[arg(short, long)]
    /// Log debug output from all workspace crates.
    pub verbose: bool,

    /// File to write the frame to. Writes to stdout if omitted.
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Kind {
    /// One surface mesh per cube.
    MultiBlock,
    /// One hexahedral cell per cube, sharing corner points.
    UnstructuredGrid,
}

fn vector_value_parser<T, const N: usize>(
    raw: &str,
) -> Result<Matrix<T, Const<N>, U1, ArrayStorage<T, N, 1>>>
where
    T: FromStr + Scalar + Zero,
    T::Err: Send + Sync + std::error::Error + 'static,
{
    let mut vec = Matrix::<T, Const<N>, U1, ArrayStorage<T, N, 1>>::zeros();

    let mut parts = raw.splitn(N, ',');
    for i in 0..N {
        let element = parts.next().context("Missing vector element")?.trim();
        vec[i] = element
            .parse()
            .context("Can't convert element from string")?;
    }

    Ok(vec)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_vectors() {
        let vec = vector_value_parser::<f32, 3>("1, 2.5,-3").unwrap();
        assert_eq!(vec.as_slice(), &[1.0, 2.5, -3.0]);

        assert!(vector_value_parser::<f32, 3>("1, 2").is_err());
        assert!(vector_value_parser::<f32, 2>("1, x").is_err());
    }

    #[test]
    fn parses_args() {
        let args = Args::try_parse_from([
            "scene_sync",
            "--grid",
            "2",
            "--kind",
            "unstructured-grid",
            "--clip",
            "1,0,0,0, 0,1,0,0, 0,0,1,0, 0,0,0,1",
            "out.json",
        ])
        .unwrap();

        assert_eq!(args.grid, 2);
        assert_eq!(args.kind, Kind::UnstructuredGrid);
        assert_eq!(args.clip.unwrap()[5], 1.0);
        assert_eq!(args.output, Some(PathBuf::from("out.json")));
    }
}
