use std::path::PathBuf;

use clap::Parser;
use pinfile::Manifest;
use tracing::instrument;

#[derive(Debug, Parser)]
#[command(about = "Re-serialize the manifest in canonical form")]
pub struct Fmt {
    /// Rewrite the manifest file in place instead of printing to stdout
    #[arg(long)]
    write: bool,
}

impl Fmt {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, manifest: PathBuf) -> anyhow::Result<()> {
        let parsed = Manifest::load(&manifest)?;

        if self.write {
            parsed.save(&manifest)?;
        } else {
            print!("{parsed}");
        }

        Ok(())
    }
}
