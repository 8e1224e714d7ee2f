use clap::Args;
use eyre::Result;
use typewriter_core::Language;
use typewriter_template::FragmentName;

#[derive(Args)]
pub struct LanguagesCommand {
    /// Also list the fragment files a fragment directory may override
    #[arg(long)]
    pub fragments: bool,
}

impl LanguagesCommand {
    pub fn run(&self) -> Result<()> {
        for language in Language::ALL {
            println!("{} (.{})", language, language.extension());
            if self.fragments {
                for name in FragmentName::ALL {
                    println!("  {}/{}", language.as_str(), name.file_name());
                }
            }
        }
        Ok(())
    }
}
