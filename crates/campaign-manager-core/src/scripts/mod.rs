//! Static ad-copy template catalog
//!
//! Real-estate Facebook Ads templates with `[Placeholder]` slots for the
//! agent to fill in. Rendered either as data or as an HTML fragment.

use serde::Serialize;

/// One ad-copy template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignScript {
    /// Template title
    pub title: &'static str,
    /// Campaign objective
    pub campaign_type: &'static str,
    /// Ad copy, one entry per line
    pub ad_copy: &'static [&'static str],
    /// Headline
    pub headline: &'static str,
    /// Call-to-action button label
    pub cta: &'static str,
    /// Creative direction
    pub creative: &'static str,
}

static CATALOG: [CampaignScript; 5] = [
    CampaignScript {
        title: "Dream Home Finder",
        campaign_type: "Lead Magnet",
        ad_copy: &[
            "🏡 Your dream home is waiting for you! 🔑",
            "Get access to an exclusive list of homes for sale in [City]. Don’t miss out!",
            "📩 Click below to download the list for FREE!",
            "👉 [CTA: Download Now]",
        ],
        headline: "🚪 Find Your Dream Home Today!",
        cta: "Download",
        creative: "Professional photos of cozy, modern homes.",
    },
    CampaignScript {
        title: "Sell Fast, Sell Smart",
        campaign_type: "Sellers Lead Gen",
        ad_copy: &[
            "🏠 Thinking of selling your home? Get the best price FAST!",
            "Our proven strategy sells homes in less than 30 days.",
            "💰 Find out what your home is worth for FREE!",
            "👉 Click below for your free home valuation!",
        ],
        headline: "💰 Sell Your Home for Top Dollar!",
        cta: "Get Your Free Valuation",
        creative: "Before-and-after images of sold homes.",
    },
    CampaignScript {
        title: "Just Listed",
        campaign_type: "Direct Sale",
        ad_copy: &[
            "🏡 HOT NEW LISTING in [Neighborhood]!",
            "✨ 3 Beds | 2 Baths | [Square Feet]",
            "💰 Price: [Insert Price]",
            "📍 [City, State]",
            "📲 Schedule a private tour now!",
        ],
        headline: "🔥 This Home Won’t Last Long!",
        cta: "Book a Tour",
        creative: "Carousel with professional photos of the home.",
    },
    CampaignScript {
        title: "Open House Invitation",
        campaign_type: "Event Promotion",
        ad_copy: &[
            "🚪 EXCLUSIVE OPEN HOUSE! See this stunning home before it’s gone!",
            "📅 Date: [Insert Date] | 📍 Location: [Insert Address]",
            "🎟 Limited spots available! Click below to RSVP.",
        ],
        headline: "🔑 Tour Your Future Home!",
        cta: "RSVP Now",
        creative: "Video walkthrough of the home.",
    },
    CampaignScript {
        title: "New Construction Homes",
        campaign_type: "Lead Magnet",
        ad_copy: &[
            "🚧 Searching for a brand-new home in [City]?",
            "Get early access to exclusive new construction properties!",
            "📩 Click below to download our New Home Guide!",
        ],
        headline: "🏗️ Get Access to the Best New Homes!",
        cta: "Download",
        creative: "Infographic with home blueprints and renderings.",
    },
];

/// The full catalog, in display order
pub fn catalog() -> &'static [CampaignScript] {
    &CATALOG
}

/// Render the catalog as one `campaign-script-box` div per template
pub fn render_html() -> String {
    CATALOG
        .iter()
        .enumerate()
        .map(|(index, script)| script_html(index + 1, script))
        .collect()
}

fn script_html(number: usize, script: &CampaignScript) -> String {
    let copy: Vec<String> = script.ad_copy.iter().map(|line| escape_html(line)).collect();
    format!(
        "<div class=\"campaign-script-box\"><h5>{}. “{}” ({})</h5>\
         <p><strong>Ad Copy:</strong><br>{}</p>\
         <p><strong>Headline:</strong> {}</p>\
         <p><strong>CTA:</strong> {}</p>\
         <p><strong>Creative:</strong> {}</p></div>",
        number,
        escape_html(script.title),
        escape_html(script.campaign_type),
        copy.join("<br>"),
        escape_html(script.headline),
        escape_html(script.cta),
        escape_html(script.creative)
    )
}

/// Escape text for HTML element content and quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_contents() {
        let titles: Vec<&str> = catalog().iter().map(|s| s.title).collect();
        assert_eq!(
            titles,
            [
                "Dream Home Finder",
                "Sell Fast, Sell Smart",
                "Just Listed",
                "Open House Invitation",
                "New Construction Homes"
            ]
        );
        assert!(catalog().iter().all(|s| !s.ad_copy.is_empty() && !s.cta.is_empty()));
    }

    #[test]
    fn html_has_one_box_per_template() {
        let html = render_html();
        assert_eq!(html.matches("<div class=\"campaign-script-box\">").count(), 5);
        assert_eq!(html.matches("</div>").count(), 5);
        assert!(html.starts_with("<div class=\"campaign-script-box\"><h5>1. “Dream Home Finder” (Lead Magnet)</h5>"));
        assert!(html.contains("<h5>3. “Just Listed” (Direct Sale)</h5>"));
        assert!(html.contains("<p><strong>CTA:</strong> Get Your Free Valuation</p>"));
        assert!(html.contains("(Lead Magnet)</h5><p><strong>Ad Copy:</strong><br>"));
        assert!(html.ends_with("</p></div>"));
        assert!(html.contains("🏡 HOT NEW LISTING in [Neighborhood]!<br>✨ 3 Beds | 2 Baths | [Square Feet]<br>"));
    }

    #[test]
    fn escaping() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
        assert_eq!(escape_html("Don’t 🏡"), "Don’t 🏡");
    }

    #[test]
    fn serializes_as_data() {
        let value = serde_json::to_value(catalog()[3]).unwrap();
        assert_eq!(value["campaignType"], "Event Promotion");
        assert_eq!(value["adCopy"].as_array().unwrap().len(), 3);
    }
}
