//! Full-page HTML rendering.
//!
//! Every public function here returns a complete HTML document built on the
//! shared chrome in [`render_page`]: navigation bar, embedded stylesheet, and
//! footer. Page content is assembled with `write!` into a `String`; dynamic
//! values pass through [`escape_html`] before they reach the output.
//!
//! Navigation between filtered views uses plain GET forms so the browser
//! handles query-string encoding. Buttons that switch a mode carry the rest
//! of the current query as hidden inputs.

use std::fmt::Write;

use chrono::{Datelike, Utc};
use dentascan_content::{Clinic, ClinicView, DentalCondition, LearnTab, Study, TeamMember};

use crate::escape_html;

// ============================================================================
// Page Chrome
// ============================================================================

/// Identifies which navigation entry the current page belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavItem {
    /// The landing page.
    Home,
    /// The upload and analysis flow.
    Upload,
    /// The education section, including condition detail pages.
    Learn,
    /// The clinic directory.
    Clinics,
    /// Pages outside the navigation, such as the 404 page.
    None,
}

/// Stylesheet embedded into every page.
///
/// The tone classes (`panel-*`, `swatch-*`, `stat-*`) are the single place
/// the severity and class colors are defined; the analysis renderer emits
/// the class names only.
const LAYOUT_STYLES: &str = "\
    body { margin: 0; font-family: 'Segoe UI', system-ui, sans-serif; color: #1f2937; }\n\
    a { color: #2563eb; }\n\
    .nav { display: flex; gap: 1.5rem; align-items: center; padding: 1rem 2rem; border-bottom: 1px solid #e5e7eb; }\n\
    .nav-brand { font-size: 1.25rem; font-weight: 700; text-decoration: none; color: #1f2937; }\n\
    .nav-link { text-decoration: none; color: #4b5563; }\n\
    .nav-link.active { color: #2563eb; font-weight: 600; }\n\
    main { max-width: 64rem; margin: 0 auto; padding: 2rem 1rem; }\n\
    footer { border-top: 1px solid #e5e7eb; padding: 2rem; display: flex; flex-wrap: wrap; gap: 2rem; }\n\
    .muted { color: #6b7280; }\n\
    .card-grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(14rem, 1fr)); gap: 1rem; }\n\
    .card { border: 1px solid #e5e7eb; border-radius: 0.5rem; padding: 1rem; }\n\
    .card img { max-width: 100%; border-radius: 0.25rem; }\n\
    .chip { display: inline-block; background: #eff6ff; color: #2563eb; border-radius: 9999px; padding: 0.1rem 0.6rem; font-size: 0.8rem; margin: 0 0.25rem 0.25rem 0; }\n\
    .button { display: inline-block; background: #2563eb; color: #ffffff; border: none; border-radius: 0.375rem; padding: 0.5rem 1.25rem; text-decoration: none; cursor: pointer; }\n\
    .button[disabled] { background: #9ca3af; cursor: not-allowed; }\n\
    .tab-active { background: #1d4ed8; }\n\
    .spinner { width: 3rem; height: 3rem; border: 4px solid #e5e7eb; border-top-color: #2563eb; border-radius: 50%; animation: spin 1s linear infinite; margin: 0 auto; }\n\
    @keyframes spin { to { transform: rotate(360deg); } }\n\
    .status-icon { font-size: 2rem; }\n\
    .image-pair { display: grid; grid-template-columns: repeat(auto-fit, minmax(16rem, 1fr)); gap: 1rem; }\n\
    .image-card { border: 1px solid #e5e7eb; border-radius: 0.5rem; padding: 1rem; text-align: center; }\n\
    .legend-grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(14rem, 1fr)); gap: 0.5rem; }\n\
    .legend-entry { display: flex; align-items: center; gap: 0.5rem; }\n\
    .swatch { width: 1rem; height: 1rem; border-radius: 0.25rem; display: inline-block; }\n\
    .swatch-green { background: #16a34a; }\n\
    .swatch-yellow { background: #eab308; }\n\
    .swatch-red { background: #dc2626; }\n\
    .swatch-orange { background: #ea580c; }\n\
    .panel-green { background: #f0fdf4; border: 1px solid #16a34a; border-radius: 0.5rem; padding: 1rem; }\n\
    .panel-yellow { background: #fefce8; border: 1px solid #eab308; border-radius: 0.5rem; padding: 1rem; }\n\
    .panel-orange { background: #fff7ed; border: 1px solid #ea580c; border-radius: 0.5rem; padding: 1rem; }\n\
    .panel-red { background: #fef2f2; border: 1px solid #dc2626; border-radius: 0.5rem; padding: 1rem; }\n\
    .panel-blue { background: #eff6ff; border: 1px solid #2563eb; border-radius: 0.5rem; padding: 1rem; }\n\
    .breakdown-grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(10rem, 1fr)); gap: 0.75rem; }\n\
    .stat-card { border-radius: 0.5rem; padding: 0.75rem; display: flex; flex-direction: column; border-left: 4px solid; }\n\
    .stat-green { border-color: #16a34a; background: #f0fdf4; }\n\
    .stat-yellow { border-color: #eab308; background: #fefce8; }\n\
    .stat-red { border-color: #dc2626; background: #fef2f2; }\n\
    .stat-orange { border-color: #ea580c; background: #fff7ed; }\n\
    .stat-value { font-size: 1.5rem; font-weight: 700; }\n\
    .sidebar-active { border-color: #2563eb; background: #eff6ff; }\n\
    .map-layout { display: grid; grid-template-columns: 18rem 1fr; gap: 1rem; }\n\
    .hero { text-align: center; padding: 3rem 1rem; }\n\
    .hero h1 { font-size: 2.25rem; }\n";

/// Wraps a page body in the shared document chrome.
#[must_use]
pub fn render_page(title: &str, active: NavItem, body: &str) -> String {
    let mut page = String::new();

    let _ = writeln!(page, "<!DOCTYPE html>");
    let _ = writeln!(page, "<html lang=\"en\">");
    let _ = writeln!(page, "<head>");
    let _ = writeln!(page, "  <meta charset=\"utf-8\">");
    let _ = writeln!(
        page,
        "  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">"
    );
    let _ = writeln!(page, "  <title>{} | DentalAI</title>", escape_html(title));
    let _ = writeln!(page, "  <style>\n{LAYOUT_STYLES}  </style>");
    let _ = writeln!(page, "</head>");
    let _ = writeln!(page, "<body>");
    write_nav(&mut page, active);
    let _ = writeln!(page, "<main>");
    page.push_str(body);
    let _ = writeln!(page, "</main>");
    write_footer(&mut page);
    let _ = writeln!(page, "</body>");
    let _ = writeln!(page, "</html>");

    page
}

fn write_nav(page: &mut String, active: NavItem) {
    let entries = [
        (NavItem::Home, "/", "Home"),
        (NavItem::Upload, "/upload", "Upload"),
        (NavItem::Learn, "/learn", "Learn"),
        (NavItem::Clinics, "/clinics", "Clinics"),
    ];

    let _ = writeln!(page, "<nav class=\"nav\">");
    let _ = writeln!(
        page,
        "  <a class=\"nav-brand\" href=\"/\">&#129463; DentalAI</a>"
    );
    for (item, href, label) in entries {
        let class = if item == active {
            "nav-link active"
        } else {
            "nav-link"
        };
        let _ = writeln!(page, "  <a class=\"{class}\" href=\"{href}\">{label}</a>");
    }
    let _ = writeln!(page, "</nav>");
}

fn write_footer(page: &mut String) {
    let year = Utc::now().year();

    let _ = writeln!(page, "<footer>");
    let _ = writeln!(page, "  <div>");
    let _ = writeln!(page, "    <p><strong>Neo Dental</strong></p>");
    let _ = writeln!(
        page,
        "    <p class=\"muted\">AI technology for early detection of dental disease. Check your \
         dental health quickly, easily, and accurately.</p>"
    );
    let _ = writeln!(page, "  </div>");
    let _ = writeln!(page, "  <div>");
    let _ = writeln!(page, "    <p><strong>Quick Links</strong></p>");
    let _ = writeln!(page, "    <p><a href=\"/\">Home</a></p>");
    let _ = writeln!(page, "    <p><a href=\"/upload\">Upload Scan</a></p>");
    let _ = writeln!(page, "    <p><a href=\"/learn\">Learn</a></p>");
    let _ = writeln!(page, "  </div>");
    let _ = writeln!(page, "  <div>");
    let _ = writeln!(page, "    <p><strong>Contact</strong></p>");
    let _ = writeln!(page, "    <p>contact@neodental.com</p>");
    let _ = writeln!(page, "    <p>Jakarta, Indonesia</p>");
    let _ = writeln!(page, "  </div>");
    let _ = writeln!(page, "  <div>");
    let _ = writeln!(
        page,
        "    <p class=\"muted\">&#169; {year} Neo Dental. All rights reserved.</p>"
    );
    let _ = writeln!(
        page,
        "    <p class=\"muted\">This application is an early detection aid and does not replace \
         a dentist's diagnosis.</p>"
    );
    let _ = writeln!(page, "  </div>");
    let _ = writeln!(page, "</footer>");
}

// ============================================================================
// Home Page
// ============================================================================

/// Renders the landing page with the hero, feature grid, and team section.
#[must_use]
pub fn home_page(team: &[TeamMember]) -> String {
    let mut body = String::new();

    let _ = writeln!(body, "<section class=\"hero\">");
    let _ = writeln!(body, "  <h1>AI-Powered Dental Disease Detection</h1>");
    let _ = writeln!(
        body,
        "  <p class=\"muted\">Upload a photo of your teeth and get instant AI analysis for early \
         detection of caries, cavities, and cracks.</p>"
    );
    let _ = writeln!(body, "  <a class=\"button\" href=\"/upload\">Upload Image</a>");
    let _ = writeln!(body, "  <a href=\"/learn\">Learn More</a>");
    let _ = writeln!(body, "</section>");

    let _ = writeln!(body, "<section>");
    let _ = writeln!(body, "  <h2>Why Choose DentalAI?</h2>");
    let _ = writeln!(body, "  <div class=\"card-grid\">");
    let features = [
        (
            "&#9889;",
            "Quick Scan",
            "Upload a photo and get your analysis in seconds.",
        ),
        (
            "&#129302;",
            "AI-Powered",
            "A deep learning segmentation model highlights each condition it finds.",
        ),
        (
            "&#128218;",
            "Educational",
            "Learn about dental conditions, prevention, and the latest research.",
        ),
        (
            "&#128202;",
            "Detailed Results",
            "Severity levels and per-condition percentage breakdowns.",
        ),
    ];
    for (icon, title, text) in features {
        let _ = writeln!(body, "    <div class=\"card\">");
        let _ = writeln!(body, "      <p class=\"status-icon\">{icon}</p>");
        let _ = writeln!(body, "      <h3>{title}</h3>");
        let _ = writeln!(body, "      <p class=\"muted\">{text}</p>");
        let _ = writeln!(body, "    </div>");
    }
    let _ = writeln!(body, "  </div>");
    let _ = writeln!(body, "</section>");

    let _ = writeln!(body, "<section>");
    let _ = writeln!(body, "  <h2>Meet Our Team</h2>");
    let _ = writeln!(body, "  <div class=\"card-grid\">");
    for member in team {
        let _ = writeln!(body, "    <div class=\"card\">");
        let _ = writeln!(
            body,
            "      <img src=\"{}\" alt=\"{}\">",
            escape_html(&member.image_url),
            escape_html(&member.name)
        );
        let _ = writeln!(body, "      <h3>{}</h3>", escape_html(&member.name));
        let _ = writeln!(body, "      <p>{}</p>", escape_html(&member.role));
        let _ = writeln!(body, "      <p class=\"muted\">{}</p>", escape_html(&member.bio));
        let _ = writeln!(
            body,
            "      <a href=\"{}\">LinkedIn</a>",
            escape_html(&member.linkedin_url)
        );
        let _ = writeln!(body, "    </div>");
    }
    let _ = writeln!(body, "  </div>");
    let _ = writeln!(body, "</section>");

    let _ = writeln!(body, "<section class=\"hero panel-blue\">");
    let _ = writeln!(body, "  <h2>Ready to check your dental health?</h2>");
    let _ = writeln!(
        body,
        "  <p class=\"muted\">Early detection is the first step towards a healthy smile.</p>"
    );
    let _ = writeln!(body, "  <a class=\"button\" href=\"/upload\">Start Scanning</a>");
    let _ = writeln!(body, "</section>");

    render_page("Home", NavItem::Home, &body)
}

// ============================================================================
// Upload Page
// ============================================================================

/// Connectivity of the segmentation service as shown in the status banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerStatusView {
    /// The health check has not completed yet.
    Checking,
    /// The service answered its health probe.
    Online,
    /// The service could not be reached.
    Offline,
}

/// A previously selected file, shown as a summary card.
#[derive(Debug, Clone)]
pub struct SelectedFileView {
    /// Original file name as uploaded.
    pub file_name: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Path the stored preview is served from.
    pub preview_path: String,
}

/// Everything the upload page needs to render.
#[derive(Debug, Clone)]
pub struct UploadPageView {
    /// Current segmentation service status.
    pub status: ServerStatusView,
    /// Selection surviving from a failed analysis, if any.
    pub selected: Option<SelectedFileView>,
    /// Error from the last upload or analysis attempt.
    pub error: Option<String>,
    /// Base URL of the segmentation service, for the troubleshooting notes.
    pub service_url: String,
}

/// Renders the upload page with the status banner, upload form, and model
/// notes.
#[must_use]
pub fn upload_page(view: &UploadPageView) -> String {
    let mut body = String::new();

    let _ = writeln!(body, "<h1>Upload Dental Image</h1>");
    let _ = writeln!(
        body,
        "<p class=\"muted\">Upload a clear photo of your teeth for AI-powered analysis.</p>"
    );

    write_status_banner(&mut body, view);

    if let Some(error) = &view.error {
        let _ = writeln!(body, "<div class=\"panel-red\">");
        let _ = writeln!(
            body,
            "  <p><strong>Error:</strong> {}</p>",
            escape_html(error)
        );
        let _ = writeln!(body, "</div>");
    }

    if let Some(selected) = &view.selected {
        let _ = writeln!(body, "<div class=\"card\">");
        let _ = writeln!(
            body,
            "  <img src=\"{}\" alt=\"Selected dental image\">",
            escape_html(&selected.preview_path)
        );
        let _ = writeln!(
            body,
            "  <p>{} <span class=\"muted\">({})</span></p>",
            escape_html(&selected.file_name),
            format_file_size(selected.size_bytes)
        );
        let _ = writeln!(body, "</div>");
    }

    let _ = writeln!(
        body,
        "<form method=\"post\" action=\"/upload\" enctype=\"multipart/form-data\" class=\"card\">"
    );
    let _ = writeln!(body, "  <h3>Drag and drop your dental image</h3>");
    let _ = writeln!(body, "  <p class=\"muted\">Support for JPG, JPEG, PNG</p>");
    let _ = writeln!(
        body,
        "  <label class=\"button\">Browse Files<input type=\"file\" name=\"file\" \
         accept=\".jpg,.jpeg,.png\" hidden></label>"
    );
    if view.status == ServerStatusView::Online {
        let _ = writeln!(body, "  <button class=\"button\" type=\"submit\">Analyze Image</button>");
    } else {
        let _ = writeln!(
            body,
            "  <button class=\"button\" type=\"submit\" disabled>Analyze Image</button>"
        );
    }
    let _ = writeln!(body, "</form>");

    let _ = writeln!(body, "<div class=\"panel-blue\">");
    let _ = writeln!(body, "  <h3>About the AI Model</h3>");
    let _ = writeln!(
        body,
        "  <p>This tool uses a U-Net deep learning model trained to segment dental images into \
         four classes: healthy tooth (green), caries (yellow), cavity (red), and crack \
         (orange).</p>"
    );
    let _ = writeln!(body, "</div>");

    render_page("Upload", NavItem::Upload, &body)
}

fn write_status_banner(body: &mut String, view: &UploadPageView) {
    match view.status {
        ServerStatusView::Checking => {
            let _ = writeln!(body, "<div class=\"panel-yellow\">");
            let _ = writeln!(body, "  <p>Server Status: Checking...</p>");
            let _ = writeln!(body, "</div>");
        }
        ServerStatusView::Online => {
            let _ = writeln!(body, "<div class=\"panel-green\">");
            let _ = writeln!(body, "  <p>Server Status: Online</p>");
            let _ = writeln!(body, "</div>");
        }
        ServerStatusView::Offline => {
            let _ = writeln!(body, "<div class=\"panel-red\">");
            let _ = writeln!(body, "  <p>Server Status: Offline</p>");
            let _ = writeln!(body, "  <form method=\"post\" action=\"/upload/recheck\">");
            let _ = writeln!(
                body,
                "    <button class=\"button\" type=\"submit\">Retry Connection</button>"
            );
            let _ = writeln!(body, "  </form>");
            let _ = writeln!(body, "  <p><strong>Troubleshooting:</strong></p>");
            let _ = writeln!(body, "  <ol>");
            let _ = writeln!(
                body,
                "    <li>Make sure the segmentation service is running: <code>python \
                 api/app.py</code></li>"
            );
            let _ = writeln!(
                body,
                "    <li>Confirm it is reachable at <code>{}</code></li>",
                escape_html(&view.service_url)
            );
            let _ = writeln!(
                body,
                "    <li>Check that <code>unet_dental_segmentation.h5</code> exists in \
                 <code>api/models/</code></li>"
            );
            let _ = writeln!(body, "  </ol>");
            let _ = writeln!(body, "</div>");
        }
    }
}

// ============================================================================
// Learn Pages
// ============================================================================

/// Renders the education page with its tab bar, search box, and either the
/// condition grid or the study list.
#[must_use]
pub fn learn_page(
    tab: LearnTab,
    query: &str,
    conditions: &[&DentalCondition],
    studies: &[&Study],
) -> String {
    let mut body = String::new();

    let _ = writeln!(body, "<h1>Dental Health Education</h1>");
    let _ = writeln!(
        body,
        "<p class=\"muted\">Learn about common dental conditions and explore the latest \
         research.</p>"
    );

    write_learn_controls(&mut body, tab, query);

    match tab {
        LearnTab::Conditions => write_condition_grid(&mut body, query, conditions),
        LearnTab::Studies => write_study_list(&mut body, query, studies),
    }

    render_page("Learn", NavItem::Learn, &body)
}

fn write_learn_controls(body: &mut String, tab: LearnTab, query: &str) {
    let tabs = [
        (LearnTab::Conditions, "Conditions"),
        (LearnTab::Studies, "Research Studies"),
    ];

    let _ = writeln!(body, "<form method=\"get\" action=\"/learn\">");
    let _ = writeln!(
        body,
        "  <input type=\"hidden\" name=\"q\" value=\"{}\">",
        escape_html(query)
    );
    for (entry, label) in tabs {
        let class = if entry == tab {
            "button tab-active"
        } else {
            "button"
        };
        let _ = writeln!(
            body,
            "  <button class=\"{class}\" type=\"submit\" name=\"tab\" value=\"{}\">{label}</button>",
            entry.as_query()
        );
    }
    let _ = writeln!(body, "</form>");

    let placeholder = match tab {
        LearnTab::Conditions => "Search conditions...",
        LearnTab::Studies => "Search studies...",
    };
    let _ = writeln!(body, "<form method=\"get\" action=\"/learn\">");
    let _ = writeln!(
        body,
        "  <input type=\"hidden\" name=\"tab\" value=\"{}\">",
        tab.as_query()
    );
    let _ = writeln!(
        body,
        "  <input type=\"search\" name=\"q\" value=\"{}\" placeholder=\"{placeholder}\">",
        escape_html(query)
    );
    let _ = writeln!(body, "  <button class=\"button\" type=\"submit\">Search</button>");
    let _ = writeln!(body, "</form>");
}

fn write_condition_grid(body: &mut String, query: &str, conditions: &[&DentalCondition]) {
    if conditions.is_empty() {
        let _ = writeln!(body, "<div class=\"card\">");
        let _ = writeln!(body, "  <h3>No conditions found</h3>");
        let _ = writeln!(body, "  <p class=\"muted\">Try a different search term.</p>");
        if !query.trim().is_empty() {
            let _ = writeln!(body, "  <a href=\"/learn\">Clear search</a>");
        }
        let _ = writeln!(body, "</div>");
        return;
    }

    let _ = writeln!(body, "<div class=\"card-grid\">");
    for condition in conditions {
        let _ = writeln!(body, "  <div class=\"card\">");
        let _ = writeln!(
            body,
            "    <img src=\"{}\" alt=\"{}\">",
            escape_html(&condition.image_url),
            escape_html(&condition.name)
        );
        let _ = writeln!(body, "    <h3>{}</h3>", escape_html(&condition.name));
        let _ = writeln!(
            body,
            "    <p class=\"muted\">{}</p>",
            escape_html(&condition.description)
        );
        let _ = writeln!(body, "    <p><strong>Common Symptoms:</strong></p>");
        let _ = writeln!(body, "    <ul>");
        for symptom in &condition.symptoms {
            let _ = writeln!(body, "      <li>{}</li>", escape_html(symptom));
        }
        let _ = writeln!(body, "    </ul>");
        let _ = writeln!(
            body,
            "    <a href=\"/learn/{}\">Learn More &#8594;</a>",
            escape_html(&condition.id)
        );
        let _ = writeln!(body, "  </div>");
    }
    let _ = writeln!(body, "</div>");
}

fn write_study_list(body: &mut String, query: &str, studies: &[&Study]) {
    if studies.is_empty() {
        let _ = writeln!(body, "<div class=\"card\">");
        let _ = writeln!(body, "  <h3>No studies found</h3>");
        let _ = writeln!(body, "  <p class=\"muted\">Try a different search term.</p>");
        if !query.trim().is_empty() {
            let _ = writeln!(body, "  <a href=\"/learn?tab=studies\">Clear search</a>");
        }
        let _ = writeln!(body, "</div>");
        return;
    }

    for study in studies {
        let _ = writeln!(body, "<div class=\"card\">");
        let _ = writeln!(body, "  <h3>{}</h3>", escape_html(&study.title));
        let _ = writeln!(
            body,
            "  <p class=\"muted\">{}</p>",
            escape_html(&study.authors.join(", "))
        );
        let _ = writeln!(
            body,
            "  <p><em>{}, {}</em></p>",
            escape_html(&study.journal),
            study.year
        );
        let _ = writeln!(body, "  <p>{}</p>", escape_html(&study.abstract_text));
        let _ = writeln!(
            body,
            "  <a href=\"{}\" target=\"_blank\" rel=\"noopener\">View Publication &#8599;</a>",
            escape_html(&study.link)
        );
        let _ = writeln!(body, "</div>");
    }
}

/// Renders the detail page for one condition.
#[must_use]
pub fn condition_page(condition: &DentalCondition) -> String {
    let detail = &condition.detail;
    let mut body = String::new();

    let _ = writeln!(body, "<a href=\"/learn\">&#8592; Back to all conditions</a>");
    let _ = writeln!(body, "<h1>{}</h1>", escape_html(&detail.title));
    let _ = writeln!(body, "<p>{}</p>", escape_html(&detail.intro));
    let _ = writeln!(
        body,
        "<img src=\"{}\" alt=\"{}\">",
        escape_html(&detail.image_url),
        escape_html(&condition.name)
    );

    for section in &detail.sections {
        let _ = writeln!(body, "<section>");
        let _ = writeln!(body, "  <h2>{}</h2>", escape_html(&section.title));

        if !section.cards.is_empty() {
            let _ = writeln!(body, "  <div class=\"card-grid\">");
            for card in &section.cards {
                let _ = writeln!(body, "    <div class=\"card\">");
                let _ = writeln!(body, "      <h3>{}</h3>", escape_html(&card.title));
                let _ = writeln!(body, "      <p>{}</p>", escape_html(&card.body));
                let _ = writeln!(body, "    </div>");
            }
            let _ = writeln!(body, "  </div>");
        }

        if !section.tips.is_empty() {
            let _ = writeln!(body, "  <ul>");
            for tip in &section.tips {
                let _ = writeln!(body, "    <li>{}</li>", escape_html(tip));
            }
            let _ = writeln!(body, "  </ul>");
        }

        for group in &section.groups {
            let _ = writeln!(body, "  <div class=\"card\">");
            let _ = writeln!(body, "    <h3>{}</h3>", escape_html(&group.title));
            let _ = writeln!(body, "    <ul>");
            for tip in &group.tips {
                let _ = writeln!(body, "      <li>{}</li>", escape_html(tip));
            }
            let _ = writeln!(body, "    </ul>");
            let _ = writeln!(body, "  </div>");
        }

        let _ = writeln!(body, "</section>");
    }

    let _ = writeln!(body, "<section>");
    let _ = writeln!(body, "  <h2>Video Explanation</h2>");
    let _ = writeln!(
        body,
        "  <iframe src=\"{}\" title=\"Video explanation\" allowfullscreen></iframe>",
        escape_html(&detail.video_url)
    );
    let _ = writeln!(body, "</section>");

    render_page(&condition.name, NavItem::Learn, &body)
}

// ============================================================================
// Clinics Page
// ============================================================================

/// Everything the clinic directory page needs to render.
#[derive(Debug)]
pub struct ClinicsPageView<'a> {
    /// List or map presentation.
    pub mode: ClinicView,
    /// Current search text, echoed back into the search box.
    pub query: &'a str,
    /// Exact specialty filter, if one is selected.
    pub specialty: Option<&'a str>,
    /// Clinics surviving the current filters.
    pub clinics: &'a [&'a Clinic],
    /// All specialties offered across the directory, for the dropdown.
    pub specialty_options: &'a [String],
    /// Clinic highlighted in map mode.
    pub selected: Option<&'a Clinic>,
}

/// Renders the clinic directory in either list or map mode.
#[must_use]
pub fn clinics_page(view: &ClinicsPageView<'_>) -> String {
    let mut body = String::new();

    let _ = writeln!(body, "<h1>Dental Clinics in Jakarta</h1>");
    let _ = writeln!(
        body,
        "<p class=\"muted\">Find trusted dental care providers near you.</p>"
    );

    write_clinic_controls(&mut body, view);

    let count = view.clinics.len();
    if count == 1 {
        let _ = writeln!(body, "<p class=\"muted\">1 clinic found</p>");
    } else {
        let _ = writeln!(body, "<p class=\"muted\">{count} clinics found</p>");
    }

    if view.clinics.is_empty() {
        let _ = writeln!(body, "<div class=\"card\">");
        let _ = writeln!(body, "  <h3>No clinics found</h3>");
        let _ = writeln!(
            body,
            "  <p class=\"muted\">Try adjusting your search or filters.</p>"
        );
        let _ = writeln!(body, "  <a href=\"/clinics\">Clear Filters</a>");
        let _ = writeln!(body, "</div>");
    } else {
        match view.mode {
            ClinicView::List => write_clinic_list(&mut body, view.clinics),
            ClinicView::Map => write_clinic_map(&mut body, view),
        }
    }

    render_page("Clinics", NavItem::Clinics, &body)
}

fn write_clinic_controls(body: &mut String, view: &ClinicsPageView<'_>) {
    let specialty = view.specialty.unwrap_or("");

    let _ = writeln!(body, "<form method=\"get\" action=\"/clinics\">");
    let _ = writeln!(
        body,
        "  <input type=\"hidden\" name=\"view\" value=\"{}\">",
        view.mode.as_query()
    );
    let _ = writeln!(
        body,
        "  <input type=\"search\" name=\"q\" value=\"{}\" placeholder=\"Search by name, location, \
         or specialty...\">",
        escape_html(view.query)
    );
    let _ = writeln!(body, "  <select name=\"specialty\">");
    let _ = writeln!(body, "    <option value=\"\">All Specialties</option>");
    for option in view.specialty_options {
        if option == specialty {
            let _ = writeln!(
                body,
                "    <option value=\"{0}\" selected>{0}</option>",
                escape_html(option)
            );
        } else {
            let _ = writeln!(
                body,
                "    <option value=\"{0}\">{0}</option>",
                escape_html(option)
            );
        }
    }
    let _ = writeln!(body, "  </select>");
    let _ = writeln!(body, "  <button class=\"button\" type=\"submit\">Search</button>");
    let _ = writeln!(body, "</form>");

    let modes = [(ClinicView::List, "List View"), (ClinicView::Map, "Map View")];
    let _ = writeln!(body, "<form method=\"get\" action=\"/clinics\">");
    let _ = writeln!(
        body,
        "  <input type=\"hidden\" name=\"q\" value=\"{}\">",
        escape_html(view.query)
    );
    let _ = writeln!(
        body,
        "  <input type=\"hidden\" name=\"specialty\" value=\"{}\">",
        escape_html(specialty)
    );
    for (mode, label) in modes {
        let class = if mode == view.mode {
            "button tab-active"
        } else {
            "button"
        };
        let _ = writeln!(
            body,
            "  <button class=\"{class}\" type=\"submit\" name=\"view\" value=\"{}\">{label}</button>",
            mode.as_query()
        );
    }
    let _ = writeln!(body, "</form>");
}

fn write_clinic_list(body: &mut String, clinics: &[&Clinic]) {
    let _ = writeln!(body, "<div class=\"card-grid\">");
    for clinic in clinics {
        write_clinic_card(body, clinic);
    }
    let _ = writeln!(body, "</div>");
}

fn write_clinic_card(body: &mut String, clinic: &Clinic) {
    let _ = writeln!(body, "  <div class=\"card\">");
    let _ = writeln!(
        body,
        "    <img src=\"{}\" alt=\"{}\">",
        escape_html(&clinic.image),
        escape_html(&clinic.name)
    );
    let _ = writeln!(
        body,
        "    <h3>{} <span>&#11088; {:.1}</span></h3>",
        escape_html(&clinic.name),
        clinic.rating
    );
    let _ = writeln!(
        body,
        "    <p class=\"muted\">&#128205; {}</p>",
        escape_html(&clinic.address)
    );
    let _ = writeln!(body, "    <p>{}</p>", escape_html(&clinic.description));
    let _ = writeln!(body, "    <p>");
    for specialty in &clinic.specialties {
        let _ = writeln!(body, "      <span class=\"chip\">{}</span>", escape_html(specialty));
    }
    let _ = writeln!(body, "    </p>");
    let _ = writeln!(
        body,
        "    <p class=\"muted\">Mon - Fri: {}<br>Saturday: {}<br>Sunday: {}</p>",
        escape_html(&clinic.open_hours.weekdays),
        escape_html(&clinic.open_hours.saturday),
        escape_html(&clinic.open_hours.sunday)
    );
    let _ = writeln!(
        body,
        "    <p>&#128222; {} &#183; {}</p>",
        escape_html(&clinic.phone),
        escape_html(&clinic.email)
    );
    if let Some(website) = &clinic.website {
        let _ = writeln!(
            body,
            "    <a href=\"{}\" target=\"_blank\" rel=\"noopener\">Visit Website</a>",
            escape_html(website)
        );
    }
    let _ = writeln!(body, "  </div>");
}

fn write_clinic_map(body: &mut String, view: &ClinicsPageView<'_>) {
    let markers: Vec<_> = view.clinics.iter().map(|clinic| clinic.marker()).collect();
    let marker_json = serde_json::to_string(&markers).unwrap_or_else(|_| "[]".to_owned());
    let specialty = view.specialty.unwrap_or("");

    let _ = writeln!(body, "<div class=\"map-layout\">");

    let _ = writeln!(body, "  <div>");
    for clinic in view.clinics {
        let selected = view
            .selected
            .is_some_and(|current| current.id == clinic.id);
        let class = if selected { "card sidebar-active" } else { "card" };
        let _ = writeln!(body, "    <form method=\"get\" action=\"/clinics\" class=\"{class}\">");
        let _ = writeln!(
            body,
            "      <input type=\"hidden\" name=\"q\" value=\"{}\">",
            escape_html(view.query)
        );
        let _ = writeln!(
            body,
            "      <input type=\"hidden\" name=\"specialty\" value=\"{}\">",
            escape_html(specialty)
        );
        let _ = writeln!(body, "      <input type=\"hidden\" name=\"view\" value=\"map\">");
        let _ = writeln!(
            body,
            "      <button type=\"submit\" name=\"selected\" value=\"{}\">{}</button>",
            escape_html(&clinic.id),
            escape_html(&clinic.name)
        );
        let _ = writeln!(
            body,
            "      <p class=\"muted\">&#11088; {:.1} &#183; {}</p>",
            clinic.rating,
            escape_html(&clinic.address)
        );
        let _ = writeln!(body, "    </form>");
    }
    let _ = writeln!(body, "  </div>");

    let _ = writeln!(body, "  <div>");
    let _ = writeln!(
        body,
        "    <script id=\"clinic-markers\" type=\"application/json\">{marker_json}</script>"
    );
    let _ = writeln!(body, "    <div id=\"map\" class=\"card\">");
    if let Some(selected) = view.selected {
        write_clinic_card(body, selected);
    } else {
        let _ = writeln!(
            body,
            "      <p class=\"muted\">Select a clinic to see its details.</p>"
        );
    }
    let _ = writeln!(body, "    </div>");
    let _ = writeln!(body, "  </div>");

    let _ = writeln!(body, "</div>");
}

// ============================================================================
// Results Pages
// ============================================================================

/// Wraps a rendered analysis body in the results page chrome.
#[must_use]
pub fn results_page(analysis_html: &str) -> String {
    let mut body = String::new();

    let _ = writeln!(body, "<a href=\"/upload\">&#8592; Upload New Image</a>");
    let _ = writeln!(body, "<h1>Analysis Results</h1>");
    body.push_str(analysis_html);

    render_page("Analysis Results", NavItem::Upload, &body)
}

/// Renders the page shown when no analysis exists for the requested id.
#[must_use]
pub fn no_results_page() -> String {
    let mut body = String::new();

    let _ = writeln!(body, "<section class=\"hero\">");
    let _ = writeln!(body, "  <h1>No Results</h1>");
    let _ = writeln!(
        body,
        "  <p class=\"muted\">Please upload an image first to view the analysis results.</p>"
    );
    let _ = writeln!(body, "  <a class=\"button\" href=\"/upload\">Back to Upload</a>");
    let _ = writeln!(body, "</section>");

    render_page("No Results", NavItem::Upload, &body)
}

// ============================================================================
// Not Found
// ============================================================================

/// Renders the 404 page.
#[must_use]
pub fn not_found_page() -> String {
    let mut body = String::new();

    let _ = writeln!(body, "<section class=\"hero\">");
    let _ = writeln!(body, "  <h1>404</h1>");
    let _ = writeln!(body, "  <h2>Page Not Found</h2>");
    let _ = writeln!(
        body,
        "  <p class=\"muted\">The page you're looking for doesn't exist or has been moved. \
         Let's get you back on track.</p>"
    );
    let _ = writeln!(body, "  <a class=\"button\" href=\"/\">Go Home</a>");
    let _ = writeln!(body, "</section>");

    render_page("Page Not Found", NavItem::None, &body)
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Formats a byte count as megabytes with two decimals.
///
/// Upload sizes are capped well below the range where the cast loses
/// precision.
#[allow(clippy::cast_precision_loss)]
fn format_file_size(size_bytes: u64) -> String {
    let megabytes = size_bytes as f64 / 1024.0 / 1024.0;
    format!("{megabytes:.2} MB")
}

// ============================================================================
// Tests
// ============================================================================
