//! Site-specific extractors that bypass the scoring heuristic.
//!
//! Video and slide hosts get a fixed embed fragment built from an identifier
//! found in the request or the page; hosts with a [`SiteRule`] get the
//! elements matched by the rule's selector. Cases are tried in
//! [`SpecialCase::ALL`] order and the first one that produces a fragment wins.
//! A case that cannot find its marker yields nothing so the next one runs.

use std::fmt;

use serde::Serialize;
use url::Url;

use crate::dom::Dom;
use crate::patterns::{NON_WORD_ONLY, VIMEO_CLIP_ID, YOUTUBE_VIDEO_ID};
use crate::siteconfig::SiteRule;

/// Where the page came from, as seen by the dispatcher.
#[derive(Debug, Clone, Copy)]
pub struct Site<'a> {
    /// Normalised host (lowercase, no leading `www.`).
    pub host: &'a str,
    /// Request path with query and fragment; empty when unknown.
    pub request: &'a str,
    /// Override rule for the host, if one is configured.
    pub rule: Option<&'a SiteRule>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialCase {
    #[serde(rename = "youtube")]
    YouTube,
    Vimeo,
    Ted,
    #[serde(rename = "slideshare")]
    SlideShare,
    GoogleVideo,
    SiteRule,
}

impl SpecialCase {
    /// Dispatch order: video and slide hosts before per-site rules.
    pub const ALL: [SpecialCase; 6] = [
        SpecialCase::YouTube,
        SpecialCase::Vimeo,
        SpecialCase::Ted,
        SpecialCase::SlideShare,
        SpecialCase::GoogleVideo,
        SpecialCase::SiteRule,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SpecialCase::YouTube => "youtube",
            SpecialCase::Vimeo => "vimeo",
            SpecialCase::Ted => "ted",
            SpecialCase::SlideShare => "slideshare",
            SpecialCase::GoogleVideo => "google_video",
            SpecialCase::SiteRule => "site_rule",
        }
    }

    /// Whether the case applies to `site`, judged from the address alone.
    pub fn matches(self, site: &Site<'_>) -> bool {
        match self {
            SpecialCase::YouTube => on_domain(site.host, "youtube.com"),
            SpecialCase::Vimeo => on_domain(site.host, "vimeo.com"),
            SpecialCase::Ted => format!("{}{}", site.host, site.request).contains("ted.com/talks"),
            SpecialCase::SlideShare => on_domain(site.host, "slideshare.net"),
            SpecialCase::GoogleVideo => on_domain(site.host, "video.google.com"),
            SpecialCase::SiteRule => site.rule.is_some(),
        }
    }

    /// Builds the replacement fragment, or `None` when the marker is missing.
    pub fn extract(self, dom: &Dom, site: &Site<'_>) -> Option<String> {
        match self {
            SpecialCase::YouTube => youtube(site),
            SpecialCase::Vimeo => vimeo(dom, site),
            SpecialCase::Ted => ted(dom),
            SpecialCase::SlideShare => slideshare(dom, site),
            SpecialCase::GoogleVideo => google_video(site),
            SpecialCase::SiteRule => site_rule(dom, site.rule?),
        }
    }
}

impl fmt::Display for SpecialCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// First special case that applies to `site` and finds its marker.
pub fn dispatch(dom: &Dom, site: &Site<'_>, debug: bool) -> Option<(SpecialCase, String)> {
    SpecialCase::ALL.into_iter().filter(|case| case.matches(site)).find_map(|case| {
        debug_trace!(debug, case = case.as_str(), host = site.host, "trying special case");
        case.extract(dom, site).map(|fragment| (case, fragment))
    })
}

fn on_domain(host: &str, domain: &str) -> bool {
    host == domain || host.strip_suffix(domain).is_some_and(|prefix| prefix.ends_with('.'))
}

fn youtube(site: &Site<'_>) -> Option<String> {
    let caps = YOUTUBE_VIDEO_ID.captures(site.request)?;
    let id = &caps[1];

    Some(format!(
        concat!(
            r#"<object width="280" height="172">"#,
            r#"<param name="movie" value="http://www.youtube.com/v/{id}?version=3&amp;hl=en_US&amp;rel=0"></param>"#,
            r#"<param name="allowFullScreen" value="true"></param>"#,
            r#"<param name="allowscriptaccess" value="always"></param>"#,
            r#"<embed src="http://www.youtube.com/v/{id}?version=3&amp;hl=en_US&amp;rel=0" "#,
            r#"type="application/x-shockwave-flash" width="280" height="172" "#,
            r#"allowscriptaccess="always" allowfullscreen="true"></embed></object>"#
        ),
        id = id
    ))
}

fn vimeo_iframe(id: &str) -> String {
    format!(r#"<iframe src="http://player.vimeo.com/video/{}" width="280" frameborder="0"></iframe>"#, id)
}

fn vimeo(dom: &Dom, site: &Site<'_>) -> Option<String> {
    let clip_value = dom
        .select("#clip_id")
        .ok()
        .and_then(|ids| ids.first().and_then(|&id| dom.attr(id, "value")))
        .map(str::trim)
        .filter(|v| !v.is_empty());
    if let Some(clip) = clip_value {
        return Some(vimeo_iframe(clip));
    }

    let path = site.request.split(['?', '#']).next().unwrap_or_default();
    if let Some(segment) = path.trim_start_matches('/').split('/').next()
        && !segment.is_empty()
        && segment.bytes().all(|b| b.is_ascii_digit())
    {
        return Some(vimeo_iframe(segment));
    }

    // channel pages embed one player per clip
    let players: String = dom
        .select(".player")
        .ok()?
        .into_iter()
        .filter_map(|player| {
            let markup = dom.outer_html(player);
            VIMEO_CLIP_ID.captures(&markup).map(|caps| vimeo_iframe(&caps[1]))
        })
        .collect();

    (!players.is_empty()).then_some(players)
}

fn ted(dom: &Dom) -> Option<String> {
    let first = *dom.select(".copy_paste").ok()?.first()?;
    let value = dom.attr(first, "value")?.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn slideshare(dom: &Dom, site: &Site<'_>) -> Option<String> {
    let movie = dom
        .select("link[name='media_presentation']")
        .ok()?
        .first()
        .and_then(|&link| dom.attr(link, "href"))?
        .to_string();

    let title = dom
        .select("h1.h-slideshow-title")
        .ok()
        .and_then(|titles| titles.first().map(|&h1| dom.inner_html(h1)))
        .unwrap_or_default();
    let title = title.trim();

    Some(format!(
        concat!(
            r#"<div style="width:280px" id="__ss_2606283">"#,
            r#"<strong style="display:block;margin:12px 0 4px">"#,
            r#"<a href="{request}" title="{title_attr}">{title}</a></strong>"#,
            r#"<object id="__sse2606283" width="280">"#,
            r#"<param name="movie" value="{movie}">"#,
            r#"<param name="allowFullScreen" value="true">"#,
            r#"<param name="allowScriptAccess" value="always">"#,
            r#"<embed name="__sse2606283" src="{movie}" type="application/x-shockwave-flash" "#,
            r#"allowscriptaccess="always" allowfullscreen="true" width="280"></embed></object></div>"#
        ),
        request = quote_attr(site.request),
        title_attr = quote_attr(title),
        title = title,
        movie = quote_attr(&movie),
    ))
}

fn google_video(site: &Site<'_>) -> Option<String> {
    let request = if site.request.starts_with('/') {
        site.request.to_string()
    } else {
        format!("/{}", site.request)
    };
    let url = Url::parse(&format!("http://{}{}", site.host, request)).ok()?;

    let docid = url.fragment().and_then(docid_in).or_else(|| url.query().and_then(docid_in))?;

    Some(format!(
        concat!(
            r#"<div><embed id="VideoPlayback" "#,
            r#"src="http://video.google.com/googleplayer.swf?docid={}&amp;hl=en&amp;fs=true" "#,
            r#"style="width:280px" allowfullscreen="true" allowscriptaccess="always" "#,
            r#"type="application/x-shockwave-flash"></embed></div>"#
        ),
        docid
    ))
}

fn docid_in(params: &str) -> Option<String> {
    url::form_urlencoded::parse(params.as_bytes())
        .find(|(key, _)| key == "docid")
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

fn site_rule(dom: &Dom, rule: &SiteRule) -> Option<String> {
    let fragment: String = dom
        .select(&rule.selector)
        .ok()?
        .into_iter()
        .filter(|&id| !NON_WORD_ONLY.is_match(&dom.inner_html(id)))
        .map(|id| dom.outer_html(id))
        .collect();

    (!fragment.is_empty()).then_some(fragment)
}

fn quote_attr(value: &str) -> String {
    value.replace('"', "&quot;")
}
