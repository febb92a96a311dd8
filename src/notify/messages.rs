//! Human-readable texts for the owner channel and the buyer email.

use crate::domain::{Order, Plan};

fn or_dash(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or("-")
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Link an admin can follow to approve `order`, if a public URL is known.
pub fn approval_link(public_base_url: Option<&str>, order: &Order) -> Option<String> {
    public_base_url
        .filter(|base| !base.is_empty())
        .map(|base| format!("{}/admin/order/{}/approve", base.trim_end_matches('/'), order.id))
}

/// Owner notification for a freshly submitted payment reference.
pub fn payment_submitted(order: &Order, public_base_url: Option<&str>) -> String {
    let approve = approval_link(public_base_url, order).unwrap_or_default();
    format!(
        "📥 New Payment Submission\n\
         Order ID: {}\n\
         Plan: {} (ID {})\n\
         Amount: ₹{}\n\
         Buyer: {} | {}\n\
         UTR: {}\n\
         Status: {}\n\
         Time: {}\n\n\
         Approve: {}",
        order.id,
        order.plan_name,
        order.plan_id,
        order.amount,
        or_dash(order.buyer_name.as_deref()),
        or_dash(order.buyer_email.as_deref()),
        or_dash(Some(order.utr.as_str())),
        order.status,
        order.created_at.to_rfc3339(),
        approve,
    )
}

#[derive(Debug, Clone, PartialEq)]
pub struct FulfillmentEmail {
    pub subject: String,
    pub html_body: String,
}

/// Buyer email sent once an order is approved.
///
/// Falls back to the order's own snapshot when the plan row is gone.
pub fn fulfillment_email(order: &Order, plan: Option<&Plan>) -> FulfillmentEmail {
    let plan_name = plan.map_or(order.plan_name.as_str(), |p| p.name.as_str());
    let price = plan.map_or(order.amount, |p| p.price);
    let name = escape_html(plan_name);
    let buyer = escape_html(order.buyer_name.as_deref().unwrap_or(""));
    let utr = escape_html(&order.utr);

    FulfillmentEmail {
        subject: format!("Your {plan_name} — Access / Receipt"),
        html_body: format!(
            r#"
<p>Hi {buyer},</p>
<p>Your payment (UTR: <strong>{utr}</strong>) for <strong>{name}</strong> of ₹{amount} has been approved.</p>
<p>Plan details:</p>
<ul>
  <li>Plan: {name}</li>
  <li>Price: ₹{price}</li>
  <li>Validity: Demo 30 days</li>
</ul>
<p>Thanks — OTT Store</p>
"#,
            amount = order.amount,
        ),
    }
}
