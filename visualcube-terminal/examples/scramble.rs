/// Example: Apply a scramble to a cube scene and print every slot
///
/// Usage: cargo run --example scramble -- path/to/cube.gltf "R U R' U'"

use std::env;
use std::fs;
use std::io;
use visualcube_core::{Document, Generator};
use visualcube_terminal::StateTable;

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().collect();

    let generator = match args.get(1) {
        Some(path) => {
            println!("Loading base scene: {}", path);
            let data = fs::read(path).map_err(|e| {
                io::Error::new(io::ErrorKind::NotFound, format!("Failed to read scene: {}", e))
            })?;
            let doc = Document::load(&data).map_err(|e| {
                io::Error::new(io::ErrorKind::InvalidData, format!("Failed to parse scene: {}", e))
            })?;
            Generator::new(doc)
        }
        None => {
            eprintln!("Usage: {} <scene> [algorithm]", args[0]);
            eprintln!("\nNo scene provided, using the built-in solved cube...");
            Generator::solved()
        }
    };

    let algorithm = args.get(2).map(String::as_str).unwrap_or("R U R' U'");
    let tokens: Vec<&str> = algorithm.split_whitespace().collect();
    let doc = generator
        .generate(&tokens)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;

    println!("After {}:", algorithm);
    StateTable::new(&doc.nodes).draw(&mut io::stdout())
}
