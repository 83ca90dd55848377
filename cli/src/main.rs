use anyhow::Result;

fn main() -> Result<()> {
    hydra_rdf_cli::run()
}
