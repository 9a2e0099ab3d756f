/// VisualCube - render a 3x3x3 cube after a sequence of face turns
///
/// Examples:
///   visualcube R U "R'" "U'" -o cube.glb
///   visualcube --alg "F2 B2" --show
///   RUST_LOG=debug visualcube --base cube.gltf U2 > turned.gltf

use anyhow::Result;
use clap::Parser;
use visualcube_terminal::{run, Args};

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    run(&args)
}
