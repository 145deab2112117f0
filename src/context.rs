use serde::{Deserialize, Serialize};
use std::fmt;

/// Correlation fields the host attaches to an invocation.
///
/// Only ever rendered into log lines; nothing in the pipeline branches on it.
/// `Display` produces the bracketed prefix used on every log line:
///
/// ```rust
/// use exif_report::context::FieldContext;
///
/// let ctx = FieldContext { log_id: Some("abc".into()), ..Default::default() };
/// assert!(ctx.to_string().starts_with("[logID=abc] [packID=]"));
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldContext {
    #[serde(rename = "logID", default)]
    pub log_id: Option<String>,
    #[serde(rename = "packID", default)]
    pub pack_id: Option<String>,
    #[serde(rename = "tenantKey", default)]
    pub tenant_key: Option<String>,
    #[serde(rename = "baseID", default)]
    pub base_id: Option<String>,
    #[serde(rename = "tableID", default)]
    pub table_id: Option<String>,
    #[serde(rename = "baseOwnerID", default)]
    pub base_owner_id: Option<String>,
    #[serde(rename = "timeZone", default)]
    pub time_zone: Option<String>,
    #[serde(rename = "isNeedPayPack", default)]
    pub is_need_pay_pack: Option<bool>,
    #[serde(rename = "hasQuota", default)]
    pub has_quota: Option<bool>,
    #[serde(rename = "baseSignature", default)]
    pub base_signature: Option<String>,
}

impl fmt::Display for FieldContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn text(v: &Option<String>) -> &str {
            v.as_deref().unwrap_or_default()
        }
        fn flag(v: Option<bool>) -> String {
            v.map(|b| b.to_string()).unwrap_or_default()
        }

        let pairs = [
            ("logID", text(&self.log_id).to_string()),
            ("packID", text(&self.pack_id).to_string()),
            ("tenantKey", text(&self.tenant_key).to_string()),
            ("baseID", text(&self.base_id).to_string()),
            ("tableID", text(&self.table_id).to_string()),
            ("baseOwnerID", text(&self.base_owner_id).to_string()),
            ("timeZone", text(&self.time_zone).to_string()),
            ("isNeedPayPack", flag(self.is_need_pay_pack)),
            ("hasQuota", flag(self.has_quota)),
            ("baseSignature", text(&self.base_signature).to_string()),
        ];

        for (i, (key, value)) in pairs.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "[{key}={value}]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_context_renders_all_keys() {
        let rendered = FieldContext::default().to_string();
        assert_eq!(
            rendered,
            "[logID=] [packID=] [tenantKey=] [baseID=] [tableID=] [baseOwnerID=] \
             [timeZone=] [isNeedPayPack=] [hasQuota=] [baseSignature=]"
        );
    }

    #[test]
    fn deserializes_host_field_names() {
        let json = r#"{
            "logID": "log-1",
            "tenantKey": "t",
            "baseID": "b",
            "tableID": "tbl",
            "timeZone": "Asia/Shanghai",
            "isNeedPayPack": false,
            "hasQuota": true,
            "somethingElse": 42
        }"#;
        let ctx: FieldContext = serde_json::from_str(json).unwrap();
        assert_eq!(ctx.log_id.as_deref(), Some("log-1"));
        assert_eq!(ctx.time_zone.as_deref(), Some("Asia/Shanghai"));
        assert_eq!(ctx.has_quota, Some(true));

        let rendered = ctx.to_string();
        assert!(rendered.contains("[logID=log-1]"));
        assert!(rendered.contains("[isNeedPayPack=false]"));
        assert!(rendered.contains("[hasQuota=true]"));
        assert!(rendered.contains("[packID=]"));
    }
}
