//! HTML rendering for confirmation emails.
//!
//! All customer-supplied text is escaped before interpolation.

use std::fmt::Write;

use crate::domain::orders::OrderWithItems;

/// Escape the five HTML-significant characters.
pub(crate) fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());

    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }

    escaped
}

pub(crate) fn customer_subject(order: &OrderWithItems) -> String {
    format!("Orderbekräftelse - {}", order.order.order_number)
}

pub(crate) fn operator_subject(order: &OrderWithItems) -> String {
    format!(
        "Ny beställning - {} - {} kr",
        order.order.order_number, order.order.total
    )
}

fn items_table(order: &OrderWithItems) -> String {
    let mut rows = String::new();

    for item in &order.items {
        let line_total = item.price_at_order * u64::from(item.quantity);

        let _ = write!(
            rows,
            "<tr>\
             <td style=\"padding: 10px; border-bottom: 1px solid #eee;\">{}</td>\
             <td style=\"padding: 10px; border-bottom: 1px solid #eee; text-align: center;\">{}</td>\
             <td style=\"padding: 10px; border-bottom: 1px solid #eee; text-align: right;\">{} kr</td>\
             </tr>",
            escape_html(&item.product_name),
            item.quantity,
            line_total,
        );
    }

    format!(
        "<table style=\"width: 100%; border-collapse: collapse; margin: 20px 0;\">\
         <thead><tr style=\"background: #f0f0f0;\">\
         <th style=\"padding: 12px; text-align: left;\">Produkt</th>\
         <th style=\"padding: 12px; text-align: center;\">Antal</th>\
         <th style=\"padding: 12px; text-align: right;\">Pris</th>\
         </tr></thead><tbody>{rows}</tbody></table>"
    )
}

fn speed_text(order: &OrderWithItems) -> String {
    let speed = order.order.delivery_speed;

    format!("{} ({})", speed.label(), speed.window())
}

fn totals_block(order: &OrderWithItems) -> String {
    let o = &order.order;
    let mut block = String::new();

    let _ = write!(
        block,
        "<p style=\"margin: 5px 0;\">Delsumma: {} kr</p>",
        o.subtotal
    );

    if o.discount > 0 {
        let _ = write!(
            block,
            "<p style=\"margin: 5px 0;\">Rabatt: -{} kr</p>",
            o.discount
        );
    }

    let _ = write!(
        block,
        "<p style=\"margin: 5px 0;\">Leveransavgift ({}): {} kr</p>",
        escape_html(&o.delivery_area_name),
        o.delivery_fee
    );

    if o.priority_fee > 0 {
        let _ = write!(
            block,
            "<p style=\"margin: 5px 0;\">Prioriterad leverans: {} kr</p>",
            o.priority_fee
        );
    }

    let _ = write!(
        block,
        "<p style=\"margin: 15px 0 0 0; font-size: 20px; font-weight: bold; color: #FF6B35;\">\
         Totalt: {} kr</p>",
        o.total
    );

    block
}

fn notes_block(notes: Option<&str>) -> String {
    match notes {
        Some(notes) => format!(
            "<div style=\"background: #e8f4fd; border-radius: 8px; padding: 15px; margin-top: 15px;\">\
             <p style=\"margin: 0;\"><strong>Meddelande:</strong> {}</p></div>",
            escape_html(notes)
        ),
        None => String::new(),
    }
}

/// Confirmation email shown to the customer.
pub(crate) fn customer_html(order: &OrderWithItems) -> String {
    let o = &order.order;

    format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"></head>\
         <body style=\"font-family: -apple-system, 'Segoe UI', Roboto, sans-serif; \
         background-color: #f5f5f5; margin: 0; padding: 20px;\">\
         <div style=\"max-width: 600px; margin: 0 auto; background: white; border-radius: 16px;\">\
         <div style=\"background: #FF6B35; padding: 30px; text-align: center;\">\
         <h1 style=\"color: white; margin: 0;\">Tack för din beställning!</h1></div>\
         <div style=\"padding: 30px;\">\
         <p>Hej {name}!</p>\
         <p>Din beställning har mottagits och vi förbereder den nu. \
         Du kommer att få dina snacks inom kort!</p>\
         <div style=\"background: #f8f8f8; border-radius: 12px; padding: 20px; margin: 20px 0;\">\
         <h2 style=\"margin: 0 0 15px 0;\">Orderdetaljer</h2>\
         <p style=\"margin: 5px 0;\"><strong>Ordernummer:</strong> {number}</p>\
         <p style=\"margin: 5px 0;\"><strong>Leveranstid:</strong> {speed}</p>\
         <p style=\"margin: 5px 0;\"><strong>Adress:</strong> {address}</p></div>\
         {items}\
         <div style=\"border-top: 2px solid #eee; padding-top: 15px;\">{totals}</div>\
         <div style=\"background: #fff3cd; border-radius: 8px; padding: 15px; margin-top: 20px;\">\
         <p style=\"margin: 0;\"><strong>Betalning:</strong> Du betalar med Apple Pay, \
         kort eller Revolut när leveransen anländer.</p></div>\
         {notes}</div>\
         <div style=\"background: #333; padding: 20px; text-align: center;\">\
         <p style=\"color: #999; margin: 0; font-size: 12px;\">\
         Snaxo - Snabba snacks till din dörr</p></div>\
         </div></body></html>",
        name = escape_html(&o.customer_name),
        number = escape_html(&o.order_number),
        speed = speed_text(order),
        address = escape_html(&o.delivery_address),
        items = items_table(order),
        totals = totals_block(order),
        notes = notes_block(o.notes.as_deref()),
    )
}

/// Notification email sent to the operator inbox.
pub(crate) fn operator_html(order: &OrderWithItems) -> String {
    let o = &order.order;

    let notes = match o.notes.as_deref() {
        Some(notes) => format!(
            "<p><strong>Meddelande:</strong> {}</p>",
            escape_html(notes)
        ),
        None => String::new(),
    };

    format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"></head>\
         <body style=\"font-family: -apple-system, 'Segoe UI', Roboto, sans-serif; padding: 20px;\">\
         <h1 style=\"color: #FF6B35;\">Ny beställning!</h1>\
         <div style=\"background: #f8f8f8; border-radius: 8px; padding: 20px; margin: 20px 0;\">\
         <h2 style=\"margin-top: 0;\">Kunduppgifter</h2>\
         <p><strong>Ordernummer:</strong> {number}</p>\
         <p><strong>Namn:</strong> {name}</p>\
         <p><strong>Email:</strong> {email}</p>\
         <p><strong>Telefon:</strong> {phone}</p>\
         <p><strong>Adress:</strong> {address}</p>\
         <p><strong>Område:</strong> {area}</p>\
         <p><strong>Leveranstid:</strong> {speed}</p>\
         {notes}</div>\
         <h2>Produkter</h2>{items}\
         <div style=\"margin-top: 20px; padding: 15px; background: #d4edda; border-radius: 8px;\">\
         {totals}</div>\
         </body></html>",
        number = escape_html(&o.order_number),
        name = escape_html(&o.customer_name),
        email = escape_html(&o.customer_email),
        phone = escape_html(&o.customer_phone),
        address = escape_html(&o.delivery_address),
        area = escape_html(&o.delivery_area_name),
        speed = speed_text(order),
        notes = notes,
        items = items_table(order),
        totals = totals_block(order),
    )
}
