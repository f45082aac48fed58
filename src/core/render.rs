use crate::core::highlight::{escape_html, highlight};
use crate::domain::model::{ServiceId, ServiceRecord};
use serde::Serialize;

pub const PLACEHOLDER_IMAGE: &str = "images/placeholder.png";
pub const CURRENCY_PREFIX: &str = "GH₵";
const LOCAL_TRUNK_PREFIX: char = '0';
const COUNTRY_CODE: &str = "233";

/// Display unit for one service. Every `*_html` field is escaped (and
/// highlighted where noted); hrefs are plain and must be attribute-escaped by
/// the presenter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardView {
    pub id: ServiceId,
    pub title: String,
    /// Highlighted.
    pub title_html: String,
    /// Highlighted.
    pub description_html: String,
    pub image_src: String,
    pub image_alt: String,
    pub category_html: String,
    pub university_html: String,
    pub hostel_html: Option<String>,
    pub price_label: String,
    pub view_href: String,
    pub whatsapp_href: String,
    pub tel_href: String,
    pub is_favorite: bool,
}

pub fn render_card(record: &ServiceRecord, term: Option<&str>, is_favorite: bool) -> CardView {
    let term = term.unwrap_or_default();
    let contact = record.contact.as_deref().map(str::trim).filter(|c| !c.is_empty());

    CardView {
        id: record.id.clone(),
        title: record.title.clone(),
        title_html: highlight(&record.title, term),
        description_html: highlight(&record.description, term),
        image_src: record
            .image
            .clone()
            .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
        image_alt: escape_html(&record.title),
        category_html: escape_html(&record.category),
        university_html: escape_html(&record.university),
        hostel_html: record.hostel.as_deref().map(escape_html),
        price_label: format!("{}{}", CURRENCY_PREFIX, escape_html(&record.price.to_string())),
        view_href: format!(
            "service.html?id={}",
            url::form_urlencoded::byte_serialize(record.id.as_str().as_bytes()).collect::<String>()
        ),
        whatsapp_href: contact.map_or_else(|| "#".to_string(), whatsapp_link),
        tel_href: contact.map_or_else(|| "#".to_string(), |c| format!("tel:{}", c)),
        is_favorite,
    }
}

/// `0241234567` -> `https://wa.me/233241234567`.
fn whatsapp_link(contact: &str) -> String {
    let international = match contact.strip_prefix(LOCAL_TRUNK_PREFIX) {
        Some(rest) => format!("{}{}", COUNTRY_CODE, rest),
        None => contact.to_string(),
    };
    format!("https://wa.me/{}", international)
}
