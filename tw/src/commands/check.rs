use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use typewriter_manifest::Manifest;
use typewriter_template::{PackageType, TypeNode};

use super::UnwrapOrExit;

#[derive(Args)]
pub struct CheckCommand {
    /// Path to types.toml (defaults to ./types.toml)
    #[arg(short, long, default_value = "types.toml")]
    pub input: PathBuf,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let manifest = Manifest::from_file(&self.input).unwrap_or_exit();

        println!("✓ {} is valid\n", self.input.display());

        let count = manifest.len();
        println!("  {} type{}:", count, if count == 1 { "" } else { "s" });
        for ty in manifest.types() {
            println!("    {} ({})", ty.name, kind(ty));
        }

        Ok(())
    }
}

fn kind(ty: &PackageType) -> String {
    match &ty.ty {
        Some(TypeNode::Struct(s)) => {
            let n = s.fields.len();
            format!("struct, {} field{}", n, if n == 1 { "" } else { "s" })
        }
        Some(TypeNode::Map(_)) => "map".to_string(),
        Some(TypeNode::Array(_)) => "array".to_string(),
        Some(TypeNode::Basic(b)) => b.ty.clone(),
        None => "untyped".to_string(),
    }
}
