//! Test corpora

use std::path::{Path, PathBuf};
use tagnet::StaticFetcher;

pub const BASE_URL: &str = "https://uni.example/";
pub const SEARCH_URL: &str = "https://uni.example/io/expertise";

/// Article keywords: six usable papers, three rows the loader skips
pub fn keyword_csv() -> &'static str {
    "\
paper,keywords
p1,Ergonomics; Comfort; Seating
p2,ergonomics;comfort
p3,Comfort;Posture;Seating;Ergonomics
p4,lighting;perception
p5,,
,usability;hci
p6,usability
p7,\"human factors; usability, testing\"
p8,posture;ergonomics;posture
"
}

pub fn write_keyword_file(dir: &Path) -> PathBuf {
    let path = dir.join("article_keywords.csv");
    std::fs::write(&path, keyword_csv()).expect("write fixture");
    path
}

fn profile_page(name: &str, data_tags: &str, keywords: Option<&str>) -> String {
    let meta = keywords
        .map(|k| format!("<meta name=\"keywords\" content=\"{}\">", k))
        .unwrap_or_default();
    format!(
        "<html><head>{}</head><body data-tags=\"{}\">\
         <div class=\"profile\"><h3>{}</h3></div></body></html>",
        meta, data_tags, name
    )
}

/// Two search terms, five profiles: three usable, one broken, one missing
pub fn expertise_site() -> StaticFetcher {
    StaticFetcher::new()
        .with_page(
            format!("{}?q=comfort", SEARCH_URL),
            r#"<a href="/personen/ann">Ann</a> <a href="/personen/bob">Bob</a>
               <a href="/personen/gone">Gone</a> <a href="/contact">Contact</a>"#,
        )
        .with_page(
            format!("{}?q=biomechanics", SEARCH_URL),
            r#"<a href="/personen/cas">Cas</a> <a href="/personen/ann">Ann</a>
               <a href="/personen/dee">Dee</a>"#,
        )
        .with_page(
            "https://uni.example/personen/ann",
            profile_page("Ann", "1:Comfort, 2:Biomechanics", Some("Seating")),
        )
        .with_page(
            "https://uni.example/personen/bob",
            profile_page("Bob", "1:Comfort,2:Seating", None),
        )
        .with_page(
            "https://uni.example/personen/cas",
            profile_page("Cas", "1:Biomechanics,2:Orthopedics", Some("comfort")),
        )
        .with_page("https://uni.example/personen/dee", "<html><body>moved</body></html>")
}
