//! Canned pages in the listing site's markup, shared by the unit tests.

/// A category page for "Naruto" with 220 published episodes
pub fn category_page() -> String {
    r##"
    <html>
    <head><title>Naruto at Gogoanime</title></head>
    <body>
        <div class="anime_info_body_bg">
            <img src="https://gogocdn.net/cover/naruto.png" alt="">
            <h1>Naruto</h1>
            <p></p>
            <p class="type"><span>Type: </span><a href="/sub-category/tv-series" title="TV Series">TV Series</a></p>
            <p class="type"><span>Plot Summary: </span>Twelve years ago: a nine-tailed fox attacked.</p>
            <p class="type"><span>Genre: </span><a href="/genre/action" title="Action">Action</a>, <a href="/genre/comedy" title="Comedy">Comedy</a>, <a href="/genre/martial-arts" title="Martial Arts">Martial Arts</a></p>
            <p class="type"><span>Released: </span>2002</p>
            <p class="type"><span>Status: </span><a href="/status/completed" title="Completed Anime">Completed</a></p>
            <p class="type"><span>Other name: </span>ナルト</p>
        </div>
        <div class="anime_video_body">
            <ul id="episode_page">
                <li><a href="#" class="active" ep_start="0" ep_end="100">0-100</a></li>
                <li><a href="#" ep_start="100" ep_end="200">101-200</a></li>
                <li><a href="#" ep_start="200" ep_end="220">201-220</a></li>
            </ul>
        </div>
    </body>
    </html>
    "##
    .to_string()
}

/// An episode page with the given download labels and provider entries
///
/// The source widget always starts with the default player and its
/// duplicate; `providers` follow as `(label, data-video)` pairs.
pub fn episode_page(download_labels: &[&str], providers: &[(&str, &str)]) -> String {
    let downloads: String = download_labels
        .iter()
        .map(|label| {
            format!(r#"<a href="https://gogodownload.net/{label}.mp4" download>{label}</a>"#)
        })
        .collect();

    let provider_entries: String = providers
        .iter()
        .map(|(label, url)| {
            format!(
                r##"<li class="{class}"><a href="#" rel="3" data-video="{url}">{label}<span>Choose this server</span></a></li>"##,
                class = label.to_lowercase()
            )
        })
        .collect();

    format!(
        r##"
    <html>
    <head><title>Naruto Episode 1</title></head>
    <body>
        <div class="anime_video_body">
            <h1>Naruto Episode 1 English Subbed</h1>
            <div class="cf-download">{downloads}</div>
            <div class="anime_muti_link">
                <ul>
                    <li class="anime"><a href="#" class="active" rel="1" data-video="//gogoplay.io/streaming.php?id=MTU">Vidstreaming<span>Choose this server</span></a></li>
                    <li class="vidcdn"><a href="#" rel="100" data-video="//gogoplay.io/embedplus?id=MTU">Gogo server<span>Choose this server</span></a></li>
                    {provider_entries}
                </ul>
            </div>
        </div>
    </body>
    </html>
    "##
    )
}

/// The default player's page; its third script carries `stream_url`
pub fn player_page(stream_url: &str) -> String {
    format!(
        r#"
    <html>
    <head>
        <script src="/js/jquery.min.js"></script>
        <script>window.dataLayer = window.dataLayer || [];</script>
    </head>
    <body>
        <div id="myVideo"></div>
        <script>
            playerInstance.setup({{
                sources: [{{ file: '{stream_url}', label: 'hls P', type: 'hls' }}],
                image: 'https://gogocdn.net/images/thumb.jpg'
            }});
        </script>
        <script>var backup = "https://backup.example/other.m3u8";</script>
    </body>
    </html>
    "#
    )
}

/// A listing page; `pager` is `(selected, total)` when the pager is shown
pub fn listing_page(items: &[(&str, &str)], pager: Option<(u32, u32)>) -> String {
    let lis: String = items
        .iter()
        .map(|(title, id)| {
            format!(
                r#"<li><div class="img"><a href="/category/{id}" title="{title}"><img src="https://gogocdn.net/cover/{id}.png" alt="{title}"></a></div>
                   <p class="name"><a href="/category/{id}" title="{title}">{title}</a></p></li>"#
            )
        })
        .collect();

    let pager_html = match pager {
        Some((selected, total)) => {
            let pages: String = (1..=total)
                .map(|n| {
                    let class = if n == selected { r#" class="selected""# } else { "" };
                    format!(r#"<li{class}><a href="?page={n}" data-page="{n}">{n}</a></li>"#)
                })
                .collect();
            format!(
                r#"<div class="anime_name_pagination"><div class="pagination"><ul class="pagination-list">{pages}</ul></div></div>"#
            )
        }
        None => String::new(),
    };

    format!(
        r#"
    <html>
    <body>
        <div class="anime_name">{pager_html}</div>
        <div class="last_episodes"><ul class="items">{lis}</ul></div>
    </body>
    </html>
    "#
    )
}

/// The home page's airing menu with the given `(title, id)` entries
pub fn home_page(airing: &[(&str, &str)]) -> String {
    let lis: String = airing
        .iter()
        .map(|(title, id)| format!(r#"<li><a href="/category/{id}" title="{title}">{title}</a></li>"#))
        .collect();

    format!(
        r#"
    <html>
    <body>
        <nav class="menu_series cron"><ul>{lis}</ul></nav>
    </body>
    </html>
    "#
    )
}
