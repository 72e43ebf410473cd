//! CLI commands implementation.

use std::path::{Path, PathBuf};

use console::style;

use super::events::parse_event;
use crate::config::Config;
use crate::markup::PageMarkup;
use crate::page::{apply_all, Effect, HeadlessSurface, PageController};
use crate::search::{render, IndexHandle, IndexLoader, RenderOutcome};

async fn read_markup(config: &Config, page: &Path) -> anyhow::Result<PageMarkup> {
    let html = tokio::fs::read_to_string(page)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", page.display(), e))?;
    Ok(PageMarkup::discover(&html, &config.selectors)?)
}

fn feature_line(name: &str, enabled: bool, detail: &str) {
    let mark = if enabled {
        style("✓").green()
    } else {
        style("✗").red()
    };
    println!("  {} {:<12} {}", mark, name, detail);
}

pub async fn cmd_inspect(config: &Config, page: &Path) -> anyhow::Result<()> {
    let markup = read_markup(config, page).await?;

    println!("\n{}", style(page.display()).bold());
    match &markup.nav {
        Some(nav) => feature_line(
            "navigation",
            true,
            &format!("expanded={}", nav.expanded),
        ),
        None => feature_line("navigation", false, "toggle or panel missing"),
    }
    match &markup.search {
        Some(search) => feature_line(
            "search",
            true,
            if search.has_button {
                "input + button"
            } else {
                "input only"
            },
        ),
        None => feature_line("search", false, "no search input"),
    }
    match &markup.carousel {
        Some(c) if c.slide_count > 1 => feature_line(
            "carousel",
            true,
            &format!("{} slides, {} dots", c.slide_count, c.dot_count),
        ),
        Some(c) => feature_line(
            "carousel",
            false,
            &format!("{} slide(s), nothing to rotate", c.slide_count),
        ),
        None => feature_line("carousel", false, "no slide track"),
    }

    Ok(())
}

pub async fn cmd_search(config: &Config, query: &str, html: bool) -> anyhow::Result<()> {
    let loader = IndexLoader::from_config(config)?;
    let index = IndexHandle::new();
    loader.load_into(&index).await;

    let Some(loaded) = index.get() else {
        // Unavailable index behaves like the page: search silently does nothing.
        println!(
            "{} Search index unavailable ({})",
            style("!").yellow(),
            loader.location()
        );
        return Ok(());
    };

    let results = crate::search::search(query, Some(loaded), config.max_results);
    match render(&results, &config.messages) {
        RenderOutcome::Notify(message) => {
            println!("{} {}", style("!").yellow(), message);
        }
        RenderOutcome::Panel(panel) if html => {
            println!("{}", panel.to_html()?);
        }
        RenderOutcome::Panel(panel) => {
            println!("\n{}", style(&panel.heading).bold());
            println!("{}", "-".repeat(60));
            for (entry, item) in results.iter().zip(&panel.items) {
                println!("{} {}", style(&item.title).cyan(), style(&item.url).dim());
                if !item.description.is_empty() {
                    println!("    {}", item.description);
                }
                if let Some(section) = &entry.section {
                    println!("    [{}]", section);
                }
            }
        }
    }

    Ok(())
}

fn describe(effect: &Effect) -> String {
    match effect {
        Effect::SetAriaExpanded(expanded) => format!("aria-expanded={}", expanded),
        Effect::SetNavPanelActive(active) => format!("nav panel active={}", active),
        Effect::SetTrackTransform(transform) => format!("track transform: {}", transform),
        Effect::SetDotActive { index, active } => format!("dot {} active={}", index, active),
        Effect::RemoveResultsPanel => "remove results panel".to_string(),
        Effect::ShowResultsPanel(panel) => format!("show results panel: {}", panel.heading),
        Effect::Notify(message) => format!("notify: {}", message),
    }
}

pub async fn cmd_simulate(config: &Config, page: &Path, args: &[String]) -> anyhow::Result<()> {
    let events = args
        .iter()
        .map(|arg| parse_event(arg))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| anyhow::anyhow!(e))?
        .into_iter()
        .flatten();

    let markup = read_markup(config, page).await?;
    let mut surface = HeadlessSurface::from_markup(&markup);
    let mut controller = PageController::new(markup, config.clone());

    let site_root = page.parent().unwrap_or_else(|| Path::new("."));
    let loader = IndexLoader::with_location(config.index_location_in_site(site_root), config)?;
    if let Some(load) = controller.ready(Some(&loader)) {
        // Headless runs have no user think-time; wait for the index.
        load.await?;
    }
    controller.carousel_ready();

    for event in events {
        println!("{} {:?}", style("→").cyan(), event);
        let effects = controller.handle(event);
        for effect in &effects {
            println!("    {}", describe(effect));
        }
        apply_all(&mut surface, &effects)?;
    }

    println!("\n{}", style("Final page state").bold());
    println!("{}", "-".repeat(60));
    println!("  aria-expanded:    {:?}", surface.aria_expanded);
    println!("  nav panel active: {}", surface.nav_panel_active);
    println!(
        "  track transform:  {}",
        surface.track_transform.as_deref().unwrap_or("(none)")
    );
    println!("  active dot:       {:?}", surface.active_dot());
    println!("  results panels:   {}", surface.panels.len());
    println!("  notifications:    {}", surface.notifications.len());

    Ok(())
}

pub async fn cmd_serve(
    config: &Config,
    site_dir: PathBuf,
    host: &str,
    port: u16,
) -> anyhow::Result<()> {
    if !site_dir.is_dir() {
        anyhow::bail!("Site directory not found: {}", site_dir.display());
    }
    println!(
        "{} Serving {} at http://{}:{}",
        style("→").cyan(),
        site_dir.display(),
        host,
        port
    );
    crate::server::serve(site_dir, config, host, port).await
}
