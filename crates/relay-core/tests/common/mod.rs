#![allow(dead_code)]
use relay_core::HttpMethod;

/// Builds a deterministic sample of distinct inbound paths.
///
/// Mixes nested segments, query-looking suffixes, empty and unicode paths so
/// derivation is exercised on the shapes a proxy actually sees.
pub fn sample_paths(count: usize) -> Vec<String> {
    let mut paths = vec![
        String::new(),
        "/".to_string(),
        "get".to_string(),
        "get/".to_string(),
        "GET".to_string(),
        "status/404".to_string(),
        "caf\u{e9}".to_string(),
    ];

    for i in 0..count {
        match i % 4 {
            0 => paths.push(format!("items/{i}")),
            1 => paths.push(format!("items/{i}/details")),
            2 => paths.push(format!("search?q={i}")),
            _ => paths.push(format!("{i}")),
        }
    }

    paths
}

/// Every (method, path) combination for the given paths.
pub fn sample_requests(paths: &[String]) -> Vec<(HttpMethod, String)> {
    HttpMethod::ALL
        .iter()
        .flat_map(|method| paths.iter().map(move |path| (*method, path.clone())))
        .collect()
}
