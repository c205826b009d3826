use std::fmt::{self, Display, Formatter, Write as _};

use super::view::{EmptyState, ItemRow, OrderCard, OrderHistoryPage, OrdersPage, TrackingPanel};

/// Render a complete HTML document for the orders page.
pub fn render_page(page: &OrdersPage) -> String {
    Document(page).to_string()
}

/// Text with `& < > " '` replaced by entities, safe in element bodies and
/// quoted attributes.
struct Escaped<'a>(&'a str);

impl Display for Escaped<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for c in self.0.chars() {
            match c {
                '&' => f.write_str("&amp;")?,
                '<' => f.write_str("&lt;")?,
                '>' => f.write_str("&gt;")?,
                '"' => f.write_str("&quot;")?,
                '\'' => f.write_str("&#39;")?,
                other => f.write_char(other)?,
            }
        }
        Ok(())
    }
}

struct Document<'a>(&'a OrdersPage);

impl Display for Document<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let title = match self.0 {
            OrdersPage::Empty(empty) => empty.title.as_str(),
            OrdersPage::History(history) => history.title.as_str(),
        };
        writeln!(f, "<!DOCTYPE html>")?;
        writeln!(f, "<html lang=\"en-IN\">")?;
        writeln!(
            f,
            "<head><meta charset=\"utf-8\"><title>{}</title></head>",
            Escaped(title)
        )?;
        writeln!(f, "<body>")?;
        match self.0 {
            OrdersPage::Empty(empty) => write_empty(f, empty)?,
            OrdersPage::History(history) => write_history(f, history)?,
        }
        writeln!(f, "</body>")?;
        writeln!(f, "</html>")
    }
}

fn write_empty(f: &mut Formatter<'_>, empty: &EmptyState) -> fmt::Result {
    writeln!(f, "<main class=\"orders-empty\">")?;
    writeln!(f, "<h1>{}</h1>", Escaped(&empty.title))?;
    writeln!(f, "<p>{}</p>", Escaped(&empty.message))?;
    writeln!(
        f,
        "<a class=\"cta\" href=\"{}\">{}</a>",
        Escaped(&empty.call_to_action.href),
        Escaped(&empty.call_to_action.label)
    )?;
    writeln!(f, "</main>")
}

fn write_history(f: &mut Formatter<'_>, page: &OrderHistoryPage) -> fmt::Result {
    writeln!(f, "<main class=\"orders\">")?;
    write!(f, "<nav class=\"breadcrumb\">")?;
    for (index, crumb) in page.breadcrumb.iter().enumerate() {
        if index > 0 {
            write!(f, "<span class=\"sep\">/</span>")?;
        }
        if crumb.href.is_empty() {
            write!(f, "<span>{}</span>", Escaped(&crumb.label))?;
        } else {
            write!(
                f,
                "<a href=\"{}\">{}</a>",
                Escaped(&crumb.href),
                Escaped(&crumb.label)
            )?;
        }
    }
    writeln!(f, "</nav>")?;
    writeln!(f, "<h1>{}</h1>", Escaped(&page.title))?;
    writeln!(f, "<p class=\"subtitle\">{}</p>", Escaped(&page.subtitle))?;
    for card in &page.orders {
        write_card(f, card)?;
    }
    writeln!(f, "</main>")
}

fn write_card(f: &mut Formatter<'_>, card: &OrderCard) -> fmt::Result {
    writeln!(f, "<article class=\"order-card\" data-order-id=\"{}\">", Escaped(&card.id))?;

    writeln!(f, "<header>")?;
    writeln!(f, "<div><p>ORDER PLACED</p><p>{}</p></div>", Escaped(&card.placed_on))?;
    writeln!(f, "<div><p>TOTAL</p><p class=\"total\">{}</p></div>", Escaped(&card.total))?;
    writeln!(f, "<div><p>SHIP TO</p><p>{}</p></div>", Escaped(&card.ship_to))?;
    writeln!(
        f,
        "<div><p>ORDER # {}</p><a href=\"{}\">View order details</a></div>",
        Escaped(&card.id),
        Escaped(&card.details_href)
    )?;
    writeln!(f, "</header>")?;

    writeln!(f, "<section class=\"status\">")?;
    writeln!(
        f,
        "<h3 class=\"status-{}\">{}</h3>",
        card.tone.as_str(),
        Escaped(&card.headline)
    )?;
    match &card.track.href {
        Some(href) if card.track.enabled => writeln!(
            f,
            "<a class=\"track\" href=\"{}\" target=\"_blank\" rel=\"noopener\">Track Order</a>",
            Escaped(href)
        )?,
        _ => writeln!(f, "<button class=\"track\" disabled>Track Order</button>")?,
    }
    write_tracking(f, &card.tracking)?;
    writeln!(f, "</section>")?;

    writeln!(f, "<ul class=\"items\">")?;
    for item in &card.items {
        write_item(f, item)?;
    }
    writeln!(f, "</ul>")?;

    writeln!(f, "</article>")
}

fn write_tracking(f: &mut Formatter<'_>, panel: &TrackingPanel) -> fmt::Result {
    let (fill_percent, steps) = match panel {
        TrackingPanel::Cancelled => {
            return writeln!(f, "<div class=\"cancelled\">Order Cancelled</div>");
        }
        TrackingPanel::Progress {
            fill_percent,
            steps,
        } => (fill_percent, steps),
    };

    writeln!(f, "<div class=\"progress\">")?;
    writeln!(
        f,
        "<div class=\"progress-line\"><div class=\"progress-fill\" style=\"width: {fill_percent}%\"></div></div>"
    )?;
    writeln!(f, "<ol class=\"steps\">")?;
    for step in steps {
        let mut class = String::from("step");
        if step.active {
            class.push_str(" active");
        }
        if step.current {
            class.push_str(" current");
        }
        writeln!(
            f,
            "<li class=\"{}\" data-step=\"{}\">{}</li>",
            class,
            step.id,
            Escaped(&step.label)
        )?;
    }
    writeln!(f, "</ol>")?;
    writeln!(f, "</div>")
}

fn write_item(f: &mut Formatter<'_>, item: &ItemRow) -> fmt::Result {
    writeln!(f, "<li class=\"item\">")?;
    writeln!(
        f,
        "<a href=\"{}\"><img src=\"{}\" alt=\"{}\"></a>",
        Escaped(&item.product_href),
        Escaped(&item.image),
        Escaped(&item.name)
    )?;
    writeln!(
        f,
        "<div><a href=\"{}\"><h3>{}</h3></a><p>Qty: {}</p><p class=\"line-total\">{}</p></div>",
        Escaped(&item.product_href),
        Escaped(&item.name),
        item.quantity,
        Escaped(&item.line_total)
    )?;
    writeln!(
        f,
        "<a class=\"buy-again\" href=\"{}\">Buy again</a>",
        Escaped(&item.buy_again_href)
    )?;
    writeln!(f, "</li>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::fixtures::order;
    use crate::domain::status::OrderStatus;

    fn render(statuses: &[OrderStatus]) -> String {
        let orders: Vec<_> = statuses
            .iter()
            .enumerate()
            .map(|(i, s)| order(&format!("ORD-{i}"), *s))
            .collect();
        render_page(&OrdersPage::build(&orders))
    }

    #[test]
    fn escapes_markup_in_text() {
        assert_eq!(
            Escaped(r#"<b>"Tom" & 'Jerry'</b>"#).to_string(),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn empty_page_has_message_and_single_call_to_action() {
        let html = render(&[]);
        assert!(html.contains("<h1>No Orders Yet</h1>"));
        assert!(html.contains("Start shopping to see your orders here."));
        assert_eq!(html.matches("class=\"cta\"").count(), 1);
        assert!(html.contains("href=\"/products\""));
    }

    #[test]
    fn renders_one_card_per_order() {
        let html = render(&[OrderStatus::Shipped, OrderStatus::Delivered, OrderStatus::Processing]);
        assert_eq!(html.matches("<article class=\"order-card\"").count(), 3);
        assert!(html.contains("<p class=\"total\">₹2,598</p>"));
        assert!(html.contains("<p>5 Mar 2024</p>"));
    }

    #[test]
    fn shipped_card_has_enabled_tracking_and_half_bar() {
        let html = render(&[OrderStatus::Shipped]);
        assert!(html.contains("href=\"/orders/ORD-0/track\" target=\"_blank\""));
        assert!(html.contains("style=\"width: 50%\""));
        assert!(!html.contains("disabled"));
    }

    #[test]
    fn processing_card_has_disabled_tracking() {
        let html = render(&[OrderStatus::Processing]);
        assert!(html.contains("<button class=\"track\" disabled>"));
        assert!(html.contains("style=\"width: 25%\""));
    }

    #[test]
    fn cancelled_card_renders_notice_without_progress_bar() {
        let html = render(&[OrderStatus::Cancelled]);
        assert!(html.contains("Order Cancelled"));
        assert!(!html.contains("progress-fill"));
        assert!(!html.contains("class=\"steps\""));
    }

    #[test]
    fn stored_text_is_escaped_in_cards() {
        let mut o = order("ORD-<1>", OrderStatus::Delivered);
        o.address.full_name = "<script>alert(1)</script>".to_string();
        let html = render_page(&OrdersPage::build(&[o]));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("data-order-id=\"ORD-&lt;1&gt;\""));
        assert!(!html.contains("<script>"));
    }
}
