use tinytemplate::TinyTemplate;
use crate::domain::{GiveawayEntry, GiveawayId};

static PLAIN_TEMPLATE: &str = include_str!("message.txt");
static HTML_TEMPLATE: &str = include_str!("message.html");

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: GiveawayId,
    pub plain: String,
    pub html: String,
}

impl Message {
    pub fn render(entry: &GiveawayEntry) -> Result<Self, tinytemplate::error::Error> {
        let mut plain_tt = TinyTemplate::new();
        plain_tt.set_default_formatter(&tinytemplate::format_unescaped);
        plain_tt.add_template("plain", PLAIN_TEMPLATE)?;

        let mut html_tt = TinyTemplate::new();
        html_tt.add_template("html", HTML_TEMPLATE)?;

        Ok(Self {
            id: entry.id,
            plain: plain_tt.render("plain", entry)?.trim_end().to_owned(),
            html: html_tt.render("html", entry)?.trim_end().to_owned(),
        })
    }
}
