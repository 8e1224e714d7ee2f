use std::{
    collections::HashSet,
    io::{self, Write},
    path::PathBuf,
};

use clap::Args;
use eyre::{Context, Result};
use typewriter_core::{File, Language, Overwrite, WriteResult};
use typewriter_manifest::Manifest;
use typewriter_template::{
    BuiltinFragments, FragmentDir, FragmentResolver, Overlay, document_to_string,
};

use super::UnwrapOrExit;

/// Base name of the rendered file in the output directory.
const OUTPUT_STEM: &str = "models";

#[derive(Args)]
pub struct RenderCommand {
    /// Path to types.toml (defaults to ./types.toml)
    #[arg(short, long, default_value = "types.toml")]
    pub input: PathBuf,

    /// Target language; repeat to render several. Names other than flow and
    /// typescript need a matching directory under --fragments
    #[arg(short, long = "language", required = true)]
    pub languages: Vec<Language>,

    /// Output directory; prints to stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Fragment overrides laid out as DIR/<language>/<fragment>.tmpl
    #[arg(long)]
    pub fragments: Option<PathBuf>,

    /// Leave existing output files untouched
    #[arg(long)]
    pub skip_existing: bool,
}

impl RenderCommand {
    /// Run the render command
    pub fn run(&self) -> Result<()> {
        let custom = self.languages.iter().find(|l| !l.is_builtin());
        if let (None, Some(language)) = (&self.fragments, custom) {
            eyre::bail!(
                "language '{language}' has no built-in fragments, pass --fragments with a '{language}/' directory"
            );
        }

        let manifest = Manifest::from_file(&self.input).unwrap_or_exit();
        let types = manifest.into_package_types();
        let resolver = self.resolver();

        let mut seen = HashSet::new();
        for language in self.languages.iter().filter(|l| seen.insert(*l)) {
            tracing::info!(%language, count = types.len(), "rendering declarations");
            let content = document_to_string(&types, &*resolver, language)
                .wrap_err_with(|| format!("Failed to render {language}"))?;

            match &self.output {
                Some(dir) => self.write(dir.join(file_name(language)), content)?,
                None => io::stdout()
                    .write_all(content.as_bytes())
                    .wrap_err("Failed to write to stdout")?,
            }
        }

        Ok(())
    }

    fn resolver(&self) -> Box<dyn FragmentResolver> {
        match &self.fragments {
            Some(dir) => {
                tracing::debug!(dir = %dir.display(), "using fragment overrides");
                Box::new(Overlay::new(FragmentDir::new(dir), BuiltinFragments))
            }
            None => Box::new(BuiltinFragments),
        }
    }

    fn write(&self, path: PathBuf, content: String) -> Result<()> {
        let overwrite = if self.skip_existing {
            Overwrite::IfMissing
        } else {
            Overwrite::Always
        };

        let file = File::new(&path, content).overwrite(overwrite);
        match file
            .write()
            .wrap_err_with(|| format!("Failed to write {}", path.display()))?
        {
            WriteResult::Written => println!("wrote {}", path.display()),
            WriteResult::Skipped => println!("skipped {} (already exists)", path.display()),
        }
        Ok(())
    }
}

fn file_name(language: &Language) -> String {
    format!("{OUTPUT_STEM}.{}", language.extension())
}
