use crate::core::highlight::escape_html;
use crate::core::render::CardView;
use crate::core::view::{Presenter, ViewState};
use crate::present::{LOAD_FAILED_MESSAGE, NO_MATCHES_MESSAGE};
use std::fmt::Write;

/// Renders the services grid as HTML. Each mount replaces the previous markup.
#[derive(Debug, Default)]
pub struct HtmlPresenter {
    markup: String,
}

impl HtmlPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn markup(&self) -> &str {
        &self.markup
    }

    pub fn into_markup(self) -> String {
        self.markup
    }
}

impl Presenter for HtmlPresenter {
    fn mount(&mut self, state: &ViewState) {
        self.markup = match state {
            ViewState::Cards(cards) => cards.iter().map(card_markup).collect(),
            ViewState::NoMatches => format!("<p class=\"empty\">{}</p>\n", NO_MATCHES_MESSAGE),
            ViewState::LoadFailed { .. } => {
                format!("<p class=\"error\">{}</p>\n", LOAD_FAILED_MESSAGE)
            }
        };
    }
}

pub fn card_markup(card: &CardView) -> String {
    let mut html = String::new();
    let hostel = card
        .hostel_html
        .as_ref()
        .map(|h| format!(" • {}", h))
        .unwrap_or_default();
    let fav_class = if card.is_favorite { " active" } else { "" };

    // write! 到 String 不會失敗
    let _ = write!(
        html,
        r#"<div class="card service-card fade-in" data-id="{id}">
  <img class="thumb lazy" data-src="{img}" alt="{alt}">
  <h3>{title}</h3>
  <p class="meta"><i class="fas fa-tags"></i> {category} • <i class="fas fa-university"></i> {university}{hostel}</p>
  <p class="desc">{desc}</p>
  <p class="price">{price}</p>
  <div class="card-actions">
    <a class="btn" href="{view}"><i class="fas fa-eye"></i> View</a>
    <button class="btn ghost fav-btn{fav_class}" data-id="{id}"><i class="fas fa-heart"></i> Fav</button>
  </div>
  <div class="social-icons">
    <a href="{whatsapp}" target="_blank" title="Chat on WhatsApp"><i class="fab fa-whatsapp"></i></a>
    <a href="{tel}" title="Call Provider"><i class="fas fa-phone-alt"></i></a>
  </div>
</div>
"#,
        id = escape_html(card.id.as_str()),
        img = escape_html(&card.image_src),
        alt = card.image_alt,
        title = card.title_html,
        category = card.category_html,
        university = card.university_html,
        hostel = hostel,
        desc = card.description_html,
        price = card.price_label,
        view = escape_html(&card.view_href),
        fav_class = fav_class,
        whatsapp = escape_html(&card.whatsapp_href),
        tel = escape_html(&card.tel_href),
    );
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::render::render_card;
    use crate::domain::model::ServiceRecord;
    use serde_json::json;

    #[test]
    fn test_cards_markup() {
        let record: ServiceRecord = serde_json::from_value(json!({
            "id": 2, "title": "Tutoring", "description": "Maths tutoring",
            "price": 50, "category": "Education", "university": "KNUST",
            "contact": "0241234567", "image": "x.png\" onerror=\"alert(1)"
        }))
        .unwrap();

        let mut presenter = HtmlPresenter::new();
        presenter.mount(&ViewState::Cards(vec![render_card(&record, Some("maths"), true)]));

        let html = presenter.markup();
        assert!(html.contains("<h3>Tutoring</h3>"));
        assert!(html.contains("<mark>Maths</mark> tutoring"));
        assert!(html.contains("GH₵50"));
        assert!(html.contains(r#"href="service.html?id=2""#));
        assert!(html.contains("https://wa.me/233241234567"));
        assert!(html.contains("fav-btn active"));
        assert!(html.contains("x.png&quot; onerror=&quot;alert(1)"));
        assert!(!html.contains("onerror=\"alert"));
    }

    #[test]
    fn test_placeholders_replace_content() {
        let mut presenter = HtmlPresenter::new();
        presenter.mount(&ViewState::NoMatches);
        assert_eq!(
            presenter.markup(),
            "<p class=\"empty\">No services match your filters.</p>\n"
        );

        presenter.mount(&ViewState::LoadFailed {
            message: "offline".to_string(),
        });
        assert_eq!(
            presenter.markup(),
            "<p class=\"error\">Failed to load services.</p>\n"
        );
    }
}
