use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub business: Business,
    pub statement: StatementSettings,
    pub receipt: ReceiptSettings,
    pub print: PrintSettings,
}

/// Issuer block printed on the statement header and on every receipt
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct Business {
    pub name: String,
    pub address: String,
    pub phone: String,
}

impl Default for Business {
    fn default() -> Self {
        Self {
            name: "Your Business Name".to_string(),
            address: "1-2-3 Example-cho, Chiyoda-ku, Tokyo".to_string(),
            phone: "03-0000-0000".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct StatementSettings {
    pub title: String,
    pub currency_symbol: String,
    /// Lines of the bank-transfer notice printed under the grand total
    pub bank_notice: Vec<String>,
}

impl Default for StatementSettings {
    fn default() -> Self {
        Self {
            title: "御請求書".to_string(),
            currency_symbol: "¥".to_string(),
            bank_notice: vec![
                "お振込先".to_string(),
                "○○銀行 ○○支店 普通 0000000".to_string(),
                "振込手数料はご負担くださいますようお願い申し上げます。".to_string(),
            ],
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ReceiptSettings {
    pub title: String,
    pub honorific: String,
    /// Line item text; `{menu}` is replaced with the record's menu
    pub item_format: String,
    pub attestation: String,
}

impl Default for ReceiptSettings {
    fn default() -> Self {
        Self {
            title: "領収書".to_string(),
            honorific: "様".to_string(),
            item_format: "但し {menu}代として".to_string(),
            attestation: "上記正に領収いたしました".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct PrintSettings {
    /// Delay between committing the template and requesting the print
    pub delay_ms: u64,
    pub output_dir: String,
}

impl Default for PrintSettings {
    fn default() -> Self {
        Self {
            delay_ms: crate::print::PRINT_DELAY.as_millis() as u64,
            output_dir: "output".to_string(),
        }
    }
}
