use std::path::Path;

use tracing::instrument;

use weekplan::Directory;

#[derive(Debug, Default, clap::Parser)]
pub struct Command {}

impl Command {
    #[instrument]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let directory = Directory::init(root.to_path_buf())
            .map_err(|e| anyhow::anyhow!("Failed to initialise plans directory: {e}"))?;

        println!(
            "Initialized plans directory in {}",
            directory.root().display()
        );
        println!("  Created: config.toml");
        println!();
        println!("Next steps:");
        println!("  wplan add \"Your First Lesson\" --subject Math --day monday");
        println!("  wplan week");

        Ok(())
    }
}
