//! Writes the localized pages described by `site.toml`.

use backend::site_generator::SiteGenerator;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = backend::load_site_config()?;
    let generator = SiteGenerator::from_config(&config);

    for page in generator.generate_all()? {
        println!("📄 Wrote {}", page.display());
    }
    Ok(())
}
