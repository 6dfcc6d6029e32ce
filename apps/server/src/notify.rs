//! Telegram notifications to the organisers' group chat.
//!
//! Sent for every new order (summary text, then the payment slip photo) and
//! every status change. Delivery is fire-and-forget: a failed or slow
//! Telegram call is logged and never affects the HTTP response.

use serde_json::json;
use std::collections::HashMap;
use std::time::Duration;
use tiger_core::{Money, Order, OrderWithItems, UNNAMED_DESIGN_LABEL};

use crate::config::{AppEnv, TelegramConfig};

/// HTTP request timeout for a single Bot API call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Prefix on every message sent from a development server.
pub const DEV_PREFIX: &str = "🧪 [ทดสอบ] ";

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The Bot API answered with a non-2xx status.
    #[error("Telegram returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },
}

// ---------------------------------------------------------------------------
// Notifier
// ---------------------------------------------------------------------------

/// Sends chat notifications when Telegram is configured; does nothing
/// otherwise.
#[derive(Clone)]
pub struct Notifier {
    client: reqwest::Client,
    telegram: Option<TelegramConfig>,
    prefix: &'static str,
}

impl Notifier {
    pub fn new(telegram: Option<TelegramConfig>, app_env: AppEnv) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Notifier {
            client,
            telegram,
            prefix: if app_env.is_development() { DEV_PREFIX } else { "" },
        })
    }

    /// A notifier that never sends.
    pub fn disabled() -> Self {
        Notifier {
            client: reqwest::Client::new(),
            telegram: None,
            prefix: "",
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.telegram.is_some()
    }

    /// Announces a new order in the background.
    pub fn order_created(&self, order: &OrderWithItems, design_names: HashMap<String, String>) {
        if !self.is_enabled() {
            return;
        }

        let text = format!("{}{}", self.prefix, new_order_message(order, &design_names));
        let caption = format!(
            "{}💳 <b>สลิปการโอนเงิน</b>\n📋 รหัสสั่งซื้อ: {}",
            self.prefix, order.order.id
        );
        let slip = order.order.slip_image.clone();
        let order_id = order.order.id;
        let notifier = self.clone();

        tokio::spawn(async move {
            if let Err(e) = notifier.send_message(&text).await {
                tracing::warn!(order_id, error = %e, "New-order notification failed");
                return;
            }
            if let Err(e) = notifier.send_photo(&slip, &caption).await {
                tracing::warn!(order_id, error = %e, "Slip photo notification failed");
            }
        });
    }

    /// Announces a status change in the background.
    pub fn status_changed(&self, order: &Order) {
        if !self.is_enabled() {
            return;
        }

        let text = format!("{}{}", self.prefix, status_message(order));
        let order_id = order.id;
        let notifier = self.clone();

        tokio::spawn(async move {
            if let Err(e) = notifier.send_message(&text).await {
                tracing::warn!(order_id, error = %e, "Status notification failed");
            }
        });
    }

    async fn send_message(&self, text: &str) -> Result<(), NotifyError> {
        self.call(
            "sendMessage",
            |chat_id| json!({ "chat_id": chat_id, "text": text, "parse_mode": "HTML" }),
        )
        .await
    }

    async fn send_photo(&self, photo_url: &str, caption: &str) -> Result<(), NotifyError> {
        self.call("sendPhoto", |chat_id| {
            json!({
                "chat_id": chat_id,
                "photo": photo_url,
                "caption": caption,
                "parse_mode": "HTML",
            })
        })
        .await
    }

    async fn call(
        &self,
        method: &str,
        payload: impl FnOnce(&str) -> serde_json::Value,
    ) -> Result<(), NotifyError> {
        let Some(telegram) = &self.telegram else {
            return Ok(());
        };

        let url = format!(
            "{}/bot{}/{}",
            telegram.api_base.trim_end_matches('/'),
            telegram.bot_token,
            method
        );
        let response = self
            .client
            .post(url)
            .json(&payload(&telegram.chat_id))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::HttpStatus { status, body });
        }

        tracing::debug!(method, "Telegram call succeeded");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Message formatting
// ---------------------------------------------------------------------------

/// Escapes text for Telegram's HTML parse mode.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Whole baht with thousands separators, e.g. `1,350`.
fn baht(money: Money) -> String {
    let display = money.to_string();
    let amount = display.trim_end_matches(" THB");
    amount.strip_suffix(".00").unwrap_or(amount).to_string()
}

pub fn new_order_message(order: &OrderWithItems, design_names: &HashMap<String, String>) -> String {
    let o = &order.order;

    let items = order
        .items
        .iter()
        .map(|item| {
            let name = design_names
                .get(&item.design)
                .map(String::as_str)
                .unwrap_or(UNNAMED_DESIGN_LABEL);
            format!(
                "  • {} ขนาด {} จำนวน {} ชิ้น",
                escape_html(name),
                escape_html(&item.size),
                item.quantity
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let delivery = if o.is_pickup { "รับหน้างาน" } else { "จัดส่ง" };
    let address = match (&o.address, o.is_pickup) {
        (Some(address), false) if !address.is_empty() => {
            format!("\n📍 <b>ที่อยู่:</b> {}", escape_html(address))
        }
        _ => String::new(),
    };

    format!(
        "🛍 <b>มีการสั่งซื้อใหม่!</b>\n\n\
         📋 <b>รหัสสั่งซื้อ:</b> {id}\n\
         👤 <b>ชื่อผู้สั่ง:</b> {name}\n\
         📞 <b>เบอร์โทรศัพท์:</b> {phone}\n\n\
         📦 <b>รายการสินค้า:</b>\n{items}\n\n\
         💰 <b>ยอดเงิน:</b>\n\
         \u{20}\u{20}• ยอดสินค้า: {subtotal} บาท\n\
         \u{20}\u{20}• ค่าจัดส่ง: {shipping} บาท\n\
         \u{20}\u{20}• <b>ยอดรวมทั้งสิ้น: {total} บาท</b>\n\n\
         🚚 <b>วิธีรับสินค้า:</b> {delivery}{address}",
        id = o.id,
        name = escape_html(&o.name),
        phone = escape_html(o.phone.as_deref().unwrap_or("-")),
        items = items,
        subtotal = baht(Money::from_satang(o.total_price_satang)),
        shipping = baht(Money::from_satang(o.shipping_satang)),
        total = baht(o.grand_total()),
        delivery = delivery,
        address = address,
    )
}

pub fn status_message(order: &Order) -> String {
    format!(
        "{} <b>อัพเดทสถานะคำสั่งซื้อ</b>\n\n\
         📋 <b>รหัสสั่งซื้อ:</b> {}\n\
         👤 <b>ชื่อผู้สั่ง:</b> {}\n\
         📊 <b>สถานะ:</b> {}",
        order.status.emoji(),
        order.id,
        escape_html(&order.name),
        order.status.label_th()
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tiger_core::{OrderLineItem, OrderStatus};

    fn order(is_pickup: bool) -> OrderWithItems {
        OrderWithItems {
            order: Order {
                id: 42,
                name: "Nok <VIP>".to_string(),
                phone: Some("0812345678".to_string()),
                address: Some("99 Sukhumvit".to_string()),
                is_pickup,
                total_price_satang: 135_000,
                shipping_satang: if is_pickup { 0 } else { 5_000 },
                slip_image: "https://blob.example/slip.jpg".to_string(),
                status: OrderStatus::Pending,
                created_at: Default::default(),
                updated_at: Default::default(),
            },
            items: vec![
                OrderLineItem::new("3", "L", 1),
                OrderLineItem::new("77", "M", 2),
            ],
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a < b & c > d"), "a &lt; b &amp; c &gt; d");
        assert_eq!(escape_html("สมชาย"), "สมชาย");
    }

    #[test]
    fn test_baht_format() {
        assert_eq!(baht(Money::from_baht(1350)), "1,350");
        assert_eq!(baht(Money::from_satang(5_050)), "50.50");
        assert_eq!(baht(Money::zero()), "0");
    }

    #[test]
    fn test_new_order_message() {
        let names = HashMap::from([("3".to_string(), "แพ็คคู่".to_string())]);
        let text = new_order_message(&order(false), &names);

        assert!(text.starts_with("🛍 <b>มีการสั่งซื้อใหม่!</b>"));
        assert!(text.contains("<b>รหัสสั่งซื้อ:</b> 42"));
        assert!(text.contains("Nok &lt;VIP&gt;"));
        assert!(text.contains("  • แพ็คคู่ ขนาด L จำนวน 1 ชิ้น"));
        assert!(text.contains("  • ไม่ระบุ ขนาด M จำนวน 2 ชิ้น"));
        assert!(text.contains("  • ค่าจัดส่ง: 50 บาท"));
        assert!(text.contains("ยอดรวมทั้งสิ้น: 1,400 บาท"));
        assert!(text.contains("จัดส่ง\n📍 <b>ที่อยู่:</b> 99 Sukhumvit"));
    }

    #[test]
    fn test_pickup_message_has_no_address() {
        let text = new_order_message(&order(true), &HashMap::new());
        assert!(text.ends_with("รับหน้างาน"));
    }

    #[test]
    fn test_status_message() {
        let mut o = order(true).order;
        o.status = OrderStatus::Confirmed;
        let text = status_message(&o);

        assert!(text.starts_with("✅ <b>อัพเดทสถานะคำสั่งซื้อ</b>"));
        assert!(text.ends_with("📊 <b>สถานะ:</b> ยืนยันการชำระเงิน"));
    }

    #[test]
    fn test_disabled_notifier_is_silent() {
        let notifier = Notifier::disabled();
        assert!(!notifier.is_enabled());
        // No runtime needed: nothing is spawned when disabled.
        notifier.status_changed(&order(true).order);
    }

    #[test]
    fn test_error_display() {
        let err = NotifyError::HttpStatus {
            status: 400,
            body: "chat not found".to_string(),
        };
        assert_eq!(err.to_string(), "Telegram returned HTTP 400: chat not found");
    }
}
