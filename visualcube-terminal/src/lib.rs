/// Command-line front end: apply an algorithm to a cube scene and write
/// the result as glTF or GLB
use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::fs;
use std::io::{stdout, Write};
use std::path::PathBuf;
use visualcube_core::{Document, Generator, OutputFormat};

pub mod report;

pub use report::StateTable;

#[derive(Parser, Debug)]
#[command(author, version, about = "Render a 3x3x3 cube after a sequence of face turns", long_about = None)]
pub struct Args {
    /// Moves to apply in order, e.g. R U R' U'
    pub moves: Vec<String>,

    /// The same moves as a single whitespace-separated string
    #[arg(long, conflicts_with = "moves")]
    pub alg: Option<String>,

    /// Base scene (.gltf or .glb) with 26 nodes named by position;
    /// defaults to the built-in solved cube
    #[arg(long)]
    pub base: Option<PathBuf>,

    /// Where to write the asset; stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// gltf or glb; defaults to the output extension, then gltf
    #[arg(long)]
    pub format: Option<OutputFormat>,

    /// Mark every material with KHR_materials_unlit
    #[arg(long)]
    pub unlit: bool,

    /// Print the state of every slot
    #[arg(long)]
    pub show: bool,
}

impl Args {
    pub fn tokens(&self) -> Vec<String> {
        match &self.alg {
            Some(alg) => alg.split_whitespace().map(str::to_string).collect(),
            None => self.moves.clone(),
        }
    }

    pub fn output_format(&self) -> OutputFormat {
        self.format
            .or_else(|| {
                self.output
                    .as_ref()
                    .and_then(|path| path.extension())
                    .and_then(|ext| ext.to_str())
                    .and_then(|ext| ext.parse().ok())
            })
            .unwrap_or_default()
    }
}

fn load_generator(args: &Args) -> Result<Generator> {
    match &args.base {
        Some(path) => {
            let data = fs::read(path)
                .with_context(|| format!("failed to read base scene {}", path.display()))?;
            let doc = Document::load(&data)
                .with_context(|| format!("failed to parse base scene {}", path.display()))?;
            Ok(Generator::new(doc))
        }
        None => Ok(Generator::solved()),
    }
}

pub fn run(args: &Args) -> Result<()> {
    let generator = load_generator(args)?;
    let tokens = args.tokens();
    let format = args.output_format();
    info!("applying {} moves, writing {format}", tokens.len());

    let mut doc = generator.generate(&tokens)?;
    if args.show {
        StateTable::new(&doc.nodes).draw(&mut stdout())?;
    }
    if args.unlit {
        doc.set_unlit();
    }
    let bytes = format.encode(&doc)?;

    match &args.output {
        Some(path) => {
            fs::write(path, &bytes)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!("wrote {} bytes to {}", bytes.len(), path.display());
        }
        None if !args.show => {
            let mut out = stdout();
            out.write_all(&bytes)?;
            out.flush()?;
        }
        None => {}
    }
    Ok(())
}
