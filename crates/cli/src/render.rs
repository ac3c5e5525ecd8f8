use pagebundle_core::AssetEnvironment;
use pagebundle_core::bundle::BundleTable;
use pagebundle_core::config::Settings;
use pagebundle_core::inline::InlineCache;
use pagebundle_core::markup;
use pagebundle_api::DEFAULT_POSITION;
use std::sync::Arc;

pub fn run(
    settings: &Settings,
    styles: &[String],
    head_scripts: &[String],
    body_scripts: &[String],
) -> anyhow::Result<()> {
    let env = AssetEnvironment::from_settings(
        settings,
        Arc::new(BundleTable::from_settings(settings)),
        Arc::new(InlineCache::new()),
    );
    let mut page = env.begin_page();
    page.contributed_by("command line");

    for path in styles {
        page.add_style(path, DEFAULT_POSITION)?;
    }
    for path in head_scripts {
        page.add_head_script(path, DEFAULT_POSITION)?;
    }
    for path in body_scripts {
        page.add_body_script(path, DEFAULT_POSITION)?;
    }

    println!("<head>");
    print_zone(&page.render_styles());
    print_zone(&page.render_head_scripts());
    println!("</head>");
    println!("<body>");
    print_zone(&page.render_body_scripts());
    println!("</body>");
    Ok(())
}

fn print_zone(rendered: &str) {
    for line in rendered.split(markup::LINE_SEPARATOR).filter(|line| !line.is_empty()) {
        println!("    {}", line);
    }
}
