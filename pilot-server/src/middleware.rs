pub fn cors() -> warp::cors::Builder {
    // Browser extensions call from chrome-extension:// origins
    warp::cors()
        .allow_any_origin()
        .allow_headers(vec!["Content-Type", "Accept"])
        .allow_methods(vec!["POST", "GET", "OPTIONS"])
}
