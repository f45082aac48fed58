use crate::core::render::CardView;
use crate::core::view::{Presenter, ViewState};
use crate::present::{LOAD_FAILED_MESSAGE, NO_MATCHES_MESSAGE};
use std::io::Write;

/// Plain terminal listing.
pub struct TextPresenter<W: Write> {
    out: W,
}

impl<W: Write> TextPresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_state(&mut self, state: &ViewState) -> std::io::Result<()> {
        match state {
            ViewState::Cards(cards) => {
                for card in cards {
                    write_card(&mut self.out, card)?;
                }
                writeln!(self.out, "{} service(s)", cards.len())
            }
            ViewState::NoMatches => writeln!(self.out, "{}", NO_MATCHES_MESSAGE),
            ViewState::LoadFailed { message } => {
                writeln!(self.out, "{} ({})", LOAD_FAILED_MESSAGE, message)
            }
        }
    }
}

impl<W: Write> Presenter for TextPresenter<W> {
    fn mount(&mut self, state: &ViewState) {
        if let Err(e) = self.write_state(state) {
            tracing::error!("Could not write listing: {}", e);
        }
    }
}

pub fn write_card<W: Write>(out: &mut W, card: &CardView) -> std::io::Result<()> {
    let star = if card.is_favorite { "★" } else { " " };
    writeln!(out, "{} [{}] {}  {}", star, card.id, card.title, plain(&card.price_label))?;
    let mut meta = format!("{} • {}", plain(&card.category_html), plain(&card.university_html));
    if let Some(hostel) = &card.hostel_html {
        meta.push_str(" • ");
        meta.push_str(&plain(hostel));
    }
    writeln!(out, "    {}", meta)?;
    let description = plain(&card.description_html);
    if !description.is_empty() {
        writeln!(out, "    {}", description)?;
    }
    if card.tel_href != "#" {
        writeln!(out, "    {}  {}", card.tel_href, card.whatsapp_href)?;
    }
    Ok(())
}

/// Undo escaping and drop highlight markers for terminal output.
fn plain(markup: &str) -> String {
    markup
        .replace("<mark>", "")
        .replace("</mark>", "")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::render::render_card;
    use crate::domain::model::ServiceRecord;
    use serde_json::json;

    #[test]
    fn test_text_listing() {
        let record: ServiceRecord = serde_json::from_value(json!({
            "id": 1, "title": "Room Cleaning", "description": "Tom & Jerry's <cleaning>",
            "price": 30, "category": "Household", "university": "UG", "hostel": "Pent"
        }))
        .unwrap();

        let mut presenter = TextPresenter::new(Vec::new());
        presenter.mount(&ViewState::Cards(vec![render_card(&record, Some("clean"), true)]));
        let output = String::from_utf8(presenter.into_inner()).unwrap();

        assert!(output.contains("★ [1] Room Cleaning  GH₵30"));
        assert!(output.contains("Household • UG • Pent"));
        assert!(output.contains("Tom & Jerry's <cleaning>"));
        assert!(output.ends_with("1 service(s)\n"));
    }

    #[test]
    fn test_text_placeholders() {
        let mut presenter = TextPresenter::new(Vec::new());
        presenter.mount(&ViewState::NoMatches);
        presenter.mount(&ViewState::LoadFailed {
            message: "connection refused".to_string(),
        });
        let output = String::from_utf8(presenter.into_inner()).unwrap();
        assert_eq!(
            output,
            "No services match your filters.\nFailed to load services. (connection refused)\n"
        );
    }
}
