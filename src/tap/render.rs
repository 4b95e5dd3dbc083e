//! HTML rendering for the index and package detail pages.
//!
//! Pure functions from the tap model to markup. Every fetched or configured
//! string goes through maud's escaping; only the static stylesheet, script
//! and icons below are emitted verbatim.

use maud::{html, Markup, PreEscaped, DOCTYPE};

use crate::config::SiteConfig;
use crate::tap::history::{RankedEntry, Rankings};
use crate::tap::Package;

const HIGHLIGHT_CSS: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/highlight.js/11.9.0/styles/atom-one-dark.min.css";
const HIGHLIGHT_JS: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/highlight.js/11.9.0/highlight.min.js";

const STYLE: &str = r#"
:root { --bg: #0f172a; --panel: rgba(30, 41, 59, 0.5); --border: #334155; --muted: #64748b; --text: #cbd5e1; --soft: #94a3b8; --accent: #38bdf8; --accent-strong: #0ea5e9; --white: #ffffff; }
html { background-color: var(--bg); scroll-behavior: smooth; }
body { font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, Helvetica, Arial, sans-serif; color: var(--text); margin: 0; overflow-y: scroll; }
.background-gradient { position: absolute; top: 0; left: 0; width: 100%; height: 450px; background-image: linear-gradient(to bottom, #1e3a8a, var(--bg)); opacity: 0.6; z-index: -1; }
.container { max-width: 1100px; margin: 0 auto; padding: 2rem 1rem; }
header { text-align: center; margin-bottom: 3rem; }
header h1 { font-size: 2.5rem; color: var(--white); }
header a { color: inherit; text-decoration: none; }
header p { font-size: 1.125rem; color: var(--soft); }
.prose { color: var(--soft); font-size: 1.125rem; line-height: 1.75; text-align: center; max-width: 45rem; margin: 0 auto 3rem auto; }
.grid-layout { display: grid; grid-template-columns: 1fr; gap: 2rem; }
@media (min-width: 1024px) { .grid-layout { grid-template-columns: 2fr 1fr; } }
h2 { font-size: 1.75rem; color: var(--white); margin-bottom: 1rem; }
.search-box input { width: 100%; padding: 0.75rem 1rem; border: 1px solid var(--border); border-radius: 0.5rem; background-color: var(--panel); color: var(--text); box-sizing: border-box; margin-bottom: 1.5rem; }
.package-card { display: block; padding: 1.25rem; background-color: var(--panel); border: 1px solid var(--border); border-radius: 0.75rem; text-decoration: none; margin-bottom: 1rem; }
.package-card-header { display: flex; justify-content: space-between; }
.package-card h3 { color: var(--accent); margin: 0; }
.package-card-date { font-size: 0.75rem; color: var(--muted); }
.package-card p { font-size: 0.875rem; color: var(--soft); margin: 0.25rem 0 0 0; }
.sidebar-card, .detail-card { background-color: var(--panel); border: 1px solid var(--border); border-radius: 0.75rem; padding: 1.25rem; }
.sidebar-card ul, .history-list { list-style: none; padding: 0; margin: 0; }
.sidebar-card li { margin-bottom: 0.75rem; }
.sidebar-card a { font-weight: 600; color: var(--text); text-decoration: none; }
.sidebar-card span, .muted { display: block; font-size: 0.875rem; color: var(--muted); }
.empty-state { text-align: center; padding: 2rem; color: var(--muted); }
.back-link { display: inline-flex; gap: 0.5rem; color: var(--accent); text-decoration: none; margin-bottom: 1.5rem; }
.code-block-wrapper { position: relative; margin-top: 0.5rem; }
.code-block-wrapper pre { margin: 0; white-space: pre-wrap; text-align: left; }
.code-block-wrapper button { position: absolute; top: 0.75rem; right: 0.75rem; background-color: var(--border); color: var(--text); border: 1px solid var(--muted); border-radius: 0.375rem; padding: 0.25rem 0.5rem; font-size: 0.75rem; cursor: pointer; }
.tabs { border-bottom: 1px solid var(--border); margin-top: 2rem; }
.tabs nav { display: flex; gap: 1.5rem; }
.tabs button { background: none; border: none; color: var(--soft); padding: 1rem 0.25rem; border-bottom: 2px solid transparent; cursor: pointer; }
.tabs button.active { color: var(--accent); border-bottom-color: var(--accent-strong); }
.tab-content { margin-top: 1.5rem; }
.history-item { display: flex; gap: 1rem; padding-bottom: 0.5rem; }
.history-details { flex-grow: 1; }
.history-message { font-size: 0.875rem; color: var(--white); }
.history-message a { color: inherit; }
.history-author, .history-date { font-size: 0.875rem; color: var(--muted); }
footer { margin-top: 3rem; text-align: center; font-size: 0.875rem; color: var(--muted); border-top: 1px solid #1e293b; padding-top: 1.5rem; }
"#;

const SCRIPT: &str = r#"
document.addEventListener('DOMContentLoaded', () => {
    if (typeof hljs !== 'undefined') { hljs.highlightAll(); }

    document.body.addEventListener('click', e => {
        if (e.target.matches('.code-block-wrapper button')) {
            const code = e.target.previousElementSibling.querySelector('code').innerText;
            navigator.clipboard.writeText(code).then(() => {
                e.target.innerText = 'Copied!';
                setTimeout(() => { e.target.innerText = 'Copy'; }, 2000);
            });
        }
    });

    const tabs = document.querySelectorAll('.tabs button');
    tabs.forEach(button => button.addEventListener('click', () => {
        tabs.forEach(btn => btn.classList.remove('active'));
        button.classList.add('active');
        document.querySelectorAll('.tab-content').forEach(panel => {
            panel.style.display = panel.id === `tab-${button.dataset.tab}` ? 'block' : 'none';
        });
    }));

    const searchInput = document.getElementById('search-input');
    if (searchInput) {
        searchInput.addEventListener('input', e => {
            const query = e.target.value.toLowerCase().trim();
            let visible = 0;
            document.querySelectorAll('.package-card').forEach(card => {
                const haystack = (card.dataset.searchContent || card.textContent).toLowerCase();
                const match = haystack.includes(query);
                card.style.display = match ? 'block' : 'none';
                if (match) { visible++; }
            });
            const empty = document.getElementById('empty-state');
            if (empty) { empty.style.display = visible === 0 ? 'block' : 'none'; }
        });
    }
});
"#;

const BACK_ICON: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="16" height="16" fill="none" viewBox="0 0 24 24" stroke="currentColor"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M10 19l-7-7m0 0l7-7m-7 7h18" /></svg>"#;

/// Renders the shared document shell around `content`.
fn page_shell(config: &SiteConfig, title: &str, content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                link rel="stylesheet" href=(HIGHLIGHT_CSS);
                script src=(HIGHLIGHT_JS) {}
                style { (PreEscaped(STYLE)) }
            }
            body {
                div.background-gradient {}
                div.container {
                    header {
                        h1 { a href=(config.repo_url()) { (config.site_name) } }
                        p { (config.description) }
                    }
                    main { (content) }
                    footer { "Site generated by tapsite." }
                }
                script { (PreEscaped(SCRIPT)) }
            }
        }
    }
}

/// Code block with a copy button.
fn code_block(code: &str, language: Option<&str>) -> Markup {
    html! {
        div.code-block-wrapper {
            pre {
                @if let Some(language) = language {
                    code class=(format!("language-{language}")) { (code) }
                } @else {
                    code { (code) }
                }
            }
            button { "Copy" }
        }
    }
}

/// Link to a package's detail page, relative to the index.
fn detail_href(name: &str) -> String {
    format!("./packages/{name}.html")
}

fn sidebar(heading: &str, entries: &[RankedEntry]) -> Markup {
    html! {
        div.sidebar-card {
            h2 { (heading) }
            ul {
                @for entry in entries {
                    li {
                        a href=(detail_href(&entry.name)) { (entry.name) }
                        span { (entry.date) }
                    }
                }
                @if entries.is_empty() {
                    li { span { "No items." } }
                }
            }
        }
    }
}

/// Renders `index.html`: all packages sorted by name plus both sidebars.
#[must_use]
pub fn render_index(config: &SiteConfig, packages: &[Package], rankings: &Rankings) -> String {
    let mut sorted: Vec<&Package> = packages.iter().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));

    let content = html! {
        div.prose {
            p {
                (config.site_name) " is a Homebrew tap with the packages listed below. "
                "To add it, run this command in your terminal:"
            }
            (code_block(&format!("brew tap {}", config.tap_name()), None))
        }
        div.grid-layout {
            div {
                h2 { "All packages" }
                div.search-box {
                    input id="search-input" type="search" placeholder="Search in name, description, date...";
                }
                div id="packages-output" {
                    @for package in &sorted {
                        a.package-card href=(detail_href(&package.name))
                            data-search-content=(format!("{} {} {}", package.name, package.description, package.last_update)) {
                            div.package-card-header {
                                h3 { (package.name) }
                                span.package-card-date { (package.last_update) }
                            }
                            p { (package.description) }
                        }
                    }
                }
                div.empty-state id="empty-state" style=(if sorted.is_empty() { "" } else { "display: none;" }) {
                    "No packages found."
                }
            }
            div style="display: flex; flex-direction: column; gap: 2rem;" {
                (sidebar("Recently updated", &rankings.recently_updated))
                (sidebar("Recently added", &rankings.recently_added))
            }
        }
    };

    page_shell(config, &config.site_name, &content).into_string()
}

/// Renders `packages/<name>.html` for one package.
#[must_use]
pub fn render_detail(config: &SiteConfig, package: &Package) -> String {
    let install = package.install_command(&config.owner, &config.repo);

    let content = html! {
        div style="max-width: 48rem; margin: 0 auto;" {
            a.back-link href="../" { (PreEscaped(BACK_ICON)) "Back to list" }
            div.detail-card {
                h2 { (package.name) }
                p.muted { (package.description) }
                p.muted { "Last update: " time { (package.last_update) } }
                div {
                    h3 { "Installation:" }
                    (code_block(&install, None))
                }
                div.tabs {
                    nav {
                        button.active data-tab="details" { "File content" }
                        button data-tab="history" { "Change history" }
                    }
                }
                div.tab-content id="tab-details" {
                    (code_block(&package.content, Some("ruby")))
                }
                div.tab-content id="tab-history" style="display: none;" {
                    @if package.history.is_empty() {
                        div.empty-state { "No history." }
                    } @else {
                        ul.history-list {
                            @for entry in &package.history {
                                li.history-item {
                                    div.history-details {
                                        p.history-message {
                                            a href=(entry.url) target="_blank" { (entry.message) }
                                        }
                                        p.history-author { "by " (entry.author) }
                                    }
                                    time.history-date { (entry.date) }
                                }
                            }
                        }
                    }
                }
            }
        }
    };

    page_shell(config, &format!("{} | {}", package.name, config.site_name), &content).into_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tap::{CommitSummary, PackageKind};

    fn config() -> SiteConfig {
        SiteConfig::new("acme", "homebrew-tap")
    }

    fn package(name: &str, kind: PackageKind) -> Package {
        let dir = kind.directory();
        Package::new(name, format!("{dir}/{name}.rb"), kind)
    }

    #[test]
    fn detail_shows_formula_install_command() {
        let html = render_detail(&config(), &package("foo", PackageKind::Formula));
        assert!(html.contains("brew install acme/homebrew-tap/foo"));
        assert!(!html.contains("--cask"));
        assert!(html.contains("<title>foo | Glowing Brew</title>"));
    }

    #[test]
    fn detail_shows_cask_install_command() {
        let html = render_detail(&config(), &package("bar", PackageKind::Cask));
        assert!(html.contains("brew install --cask acme/homebrew-tap/bar"));
    }

    #[test]
    fn detail_escapes_content_and_description() {
        let mut pkg = package("foo", PackageKind::Formula);
        pkg.description = "Fast <b>&</b> \"safe\"".into();
        pkg.content = "if a < b && c > d\n  puts \"<script>alert(1)</script>\"\nend\n".into();

        let html = render_detail(&config(), &pkg);

        assert!(html.contains("Fast &lt;b&gt;&amp;&lt;/b&gt; &quot;safe&quot;"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!html.contains("<script>alert(1)"));
        assert!(!html.contains("<b>&</b>"));
        assert!(html.contains("class=\"language-ruby\""));
    }

    #[test]
    fn detail_lists_history_entries() {
        let mut pkg = package("foo", PackageKind::Formula);
        pkg.history = vec![CommitSummary {
            message: "Update foo to 1.2 <beta>".into(),
            author: "Jane Doe".into(),
            date: "01. 06. 2024".into(),
            url: "https://github.com/acme/homebrew-tap/commit/abc".into(),
        }];

        let html = render_detail(&config(), &pkg);

        assert!(html.contains("Update foo to 1.2 &lt;beta&gt;"));
        assert!(html.contains("by Jane Doe"));
        assert!(html.contains("01. 06. 2024"));
        assert!(html.contains("href=\"https://github.com/acme/homebrew-tap/commit/abc\""));
        assert!(!html.contains("No history."));
    }

    #[test]
    fn detail_without_history_shows_empty_state() {
        let html = render_detail(&config(), &package("foo", PackageKind::Formula));
        assert!(html.contains("No history."));
    }

    #[test]
    fn index_lists_packages_sorted_by_name() {
        let packages = vec![
            package("zeta", PackageKind::Formula),
            package("alpha", PackageKind::Cask),
            package("mid", PackageKind::Formula),
        ];
        let html = render_index(&config(), &packages, &Rankings::default());

        let alpha = html.find("<h3>alpha</h3>").unwrap();
        let mid = html.find("<h3>mid</h3>").unwrap();
        let zeta = html.find("<h3>zeta</h3>").unwrap();
        assert!(alpha < mid && mid < zeta);
        assert!(html.contains("href=\"./packages/alpha.html\""));
        assert!(html.contains("data-search-content=\"alpha Loading... Unknown\""));
        assert!(html.contains("brew tap acme/tap"));
    }

    #[test]
    fn index_renders_sidebars() {
        let rankings = Rankings {
            recently_added: vec![RankedEntry { name: "foo".into(), date: "01. 01. 2024".into() }],
            recently_updated: vec![],
        };
        let html = render_index(&config(), &[package("foo", PackageKind::Formula)], &rankings);

        assert!(html.contains("Recently added"));
        assert!(html.contains("Recently updated"));
        assert!(html.contains("<span>01. 01. 2024</span>"));
        assert!(html.contains("No items."));
    }

    #[test]
    fn index_escapes_descriptions() {
        let mut pkg = package("foo", PackageKind::Formula);
        pkg.description = "<img src=x onerror=alert(1)>".into();
        let html = render_index(&config(), &[pkg], &Rankings::default());
        assert!(html.contains("&lt;img src=x onerror=alert(1)&gt;"));
        assert!(!html.contains("<img src=x"));
    }

    #[test]
    fn shell_links_repository_and_escapes_site_name() {
        let config = config().with_site_name("Brew & Co");
        let html = render_index(&config, &[], &Rankings::default());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("href=\"https://github.com/acme/homebrew-tap/\""));
        assert!(html.contains("<title>Brew &amp; Co</title>"));
    }
}
