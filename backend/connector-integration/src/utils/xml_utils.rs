//! Flat XML codec for the Payment Express wire format.
//!
//! The gateway never nests request structures: every request is a single
//! root tag holding one text element per field, so a single-level encoder
//! is sufficient and a general XML object model is avoided. Responses are
//! read as a flat view over descendant element texts; PxPost nests its
//! result fields one level down inside a `Transaction` element, which the
//! recursive walk flattens away.

use std::{collections::HashMap, io::Cursor};

use common_utils::errors::CustomResult;
use domain_types::errors::GatewayError;
use error_stack::report;
use quick_xml::{
    events::{BytesEnd, BytesStart, BytesText, Event},
    Reader, Writer,
};
use secrecy::ExposeSecret;

use crate::connectors::paymentexpress::transformers::{ParamMap, ParamValue};

/// Serializes a parameter set into a single-level XML document under
/// `root`.
///
/// This is the resolution point for deferred configuration failures: a
/// parameter still carrying [`ParamValue::Missing`] fails here with the
/// setting's name, so unset credentials only surface when a request
/// actually needs them. Secret values are exposed only into the wire body.
pub fn params_to_xml(params: &ParamMap, root: &str) -> CustomResult<String, GatewayError> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    write_event(&mut writer, Event::Start(BytesStart::new(root)))?;

    for (key, value) in params {
        let text = match value {
            ParamValue::Value(value) => value.clone(),
            ParamValue::Secret(secret) => secret.expose_secret().clone(),
            ParamValue::Missing(setting) => {
                tracing::error!(setting, "request needs an unset configuration value");
                return Err(report!(GatewayError::MissingSetting(setting)));
            }
        };
        write_event(&mut writer, Event::Start(BytesStart::new(key.as_str())))?;
        write_event(&mut writer, Event::Text(BytesText::new(&text)))?;
        write_event(&mut writer, Event::End(BytesEnd::new(key.as_str())))?;
    }

    write_event(&mut writer, Event::End(BytesEnd::new(root)))?;

    String::from_utf8(writer.into_inner().into_inner()).map_err(|error| {
        tracing::error!(?error, "request document is not valid UTF-8");
        report!(GatewayError::RequestEncodingFailed)
    })
}

fn write_event(
    writer: &mut Writer<Cursor<Vec<u8>>>,
    event: Event<'_>,
) -> CustomResult<(), GatewayError> {
    writer.write_event(event).map_err(|error| {
        tracing::error!(?error, "XML serialization error");
        report!(GatewayError::RequestEncodingFailed)
    })
}

/// Read-only flat view of a gateway response document, addressed by tag
/// name.
#[derive(Debug, Clone)]
pub struct ResponseDocument {
    root: String,
    valid: Option<String>,
    fields: Vec<(String, String)>,
}

impl ResponseDocument {
    /// Root element name.
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Value of the `valid` attribute on the root element, when present.
    pub fn valid(&self) -> Option<&str> {
        self.valid.as_deref()
    }

    /// Text of the first descendant element named `tag`, in document
    /// order, at any depth.
    pub fn text(&self, tag: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == tag)
            .map(|(_, value)| value.as_str())
    }

    /// Flattens the document into tag → text over every element bearing
    /// non-empty text.
    pub fn non_empty_fields(&self) -> HashMap<String, String> {
        self.fields.iter().cloned().collect()
    }
}

/// Parses a gateway response body into a [`ResponseDocument`].
pub fn parse_response(body: &[u8]) -> CustomResult<ResponseDocument, GatewayError> {
    let mut reader = Reader::from_reader(body);
    reader.trim_text(true);

    let mut root: Option<String> = None;
    let mut valid: Option<String> = None;
    let mut stack: Vec<String> = Vec::new();
    let mut fields: Vec<(String, String)> = Vec::new();
    let mut buf = Vec::new();

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|error| deserialization_error(&error))?;
        match event {
            Event::Start(start) => {
                let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
                if root.is_none() {
                    valid = root_valid_attribute(&start)?;
                    root = Some(name.clone());
                }
                stack.push(name);
            }
            Event::Empty(start) => {
                if root.is_none() {
                    valid = root_valid_attribute(&start)?;
                    root = Some(String::from_utf8_lossy(start.name().as_ref()).into_owned());
                }
            }
            Event::Text(text) => {
                if stack.len() > 1 {
                    let value = text
                        .unescape()
                        .map_err(|error| deserialization_error(&error))?
                        .into_owned();
                    record_text(&stack, value, &mut fields);
                }
            }
            Event::CData(data) => {
                if stack.len() > 1 {
                    let value = String::from_utf8_lossy(&data.into_inner()).into_owned();
                    record_text(&stack, value, &mut fields);
                }
            }
            Event::End(_) => {
                stack.pop();
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    let root = root.ok_or_else(|| {
        report!(GatewayError::ResponseDeserializationFailed)
            .attach_printable("response body held no XML document")
    })?;

    Ok(ResponseDocument {
        root,
        valid,
        fields,
    })
}

fn deserialization_error<E: std::fmt::Debug>(error: &E) -> error_stack::Report<GatewayError> {
    tracing::error!(?error, "failed to parse gateway response");
    report!(GatewayError::ResponseDeserializationFailed)
}

fn root_valid_attribute(start: &BytesStart<'_>) -> CustomResult<Option<String>, GatewayError> {
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|error| deserialization_error(&error))?;
        if attribute.key.as_ref() == b"valid" {
            let value = attribute
                .unescape_value()
                .map_err(|error| deserialization_error(&error))?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

fn record_text(stack: &[String], value: String, fields: &mut Vec<(String, String)>) {
    if value.is_empty() {
        return;
    }
    if let Some(element) = stack.last() {
        fields.push((element.clone(), value));
    }
}

#[cfg(test)]
mod tests {
    use secrecy::Secret;

    use super::*;

    fn value_params(entries: &[(&str, &str)]) -> ParamMap {
        entries
            .iter()
            .map(|(key, value)| (key.to_string(), ParamValue::from(*value)))
            .collect()
    }

    #[test]
    fn encode_decode_round_trip() {
        let params = value_params(&[
            ("TxnType", "Purchase"),
            ("Amount", "10.00"),
            ("MerchantReference", "ORDER-1"),
        ]);

        let xml = params_to_xml(&params, "Txn").unwrap();
        let document = parse_response(xml.as_bytes()).unwrap();

        assert_eq!(document.root(), "Txn");
        let decoded = document.non_empty_fields();
        assert_eq!(decoded.len(), 3);
        assert_eq!(decoded.get("TxnType").map(String::as_str), Some("Purchase"));
        assert_eq!(decoded.get("Amount").map(String::as_str), Some("10.00"));
        assert_eq!(
            decoded.get("MerchantReference").map(String::as_str),
            Some("ORDER-1")
        );
    }

    #[test]
    fn text_content_is_escaped_on_the_wire() {
        let params = value_params(&[("MerchantReference", "Fish & Chips <large>")]);

        let xml = params_to_xml(&params, "GenerateRequest").unwrap();
        assert!(xml.contains("Fish &amp; Chips &lt;large&gt;"));

        let document = parse_response(xml.as_bytes()).unwrap();
        assert_eq!(
            document.text("MerchantReference"),
            Some("Fish & Chips <large>")
        );
    }

    #[test]
    fn secret_values_are_written_in_clear_on_the_wire() {
        let mut params = ParamMap::new();
        params.insert(
            "PxPayKey".to_string(),
            ParamValue::Secret(Secret::new("hunter2".to_string())),
        );

        let xml = params_to_xml(&params, "GenerateRequest").unwrap();
        assert!(xml.contains("<PxPayKey>hunter2</PxPayKey>"));
    }

    #[test]
    fn unresolved_setting_fails_encoding_with_its_name() {
        let mut params = value_params(&[("TxnType", "Purchase")]);
        params.insert("PxPayKey".to_string(), ParamValue::Missing("pxpay_key"));

        let error = params_to_xml(&params, "GenerateRequest").unwrap_err();
        assert_eq!(
            error.current_context(),
            &GatewayError::MissingSetting("pxpay_key")
        );
    }

    #[test]
    fn overridden_setting_encodes_fine() {
        let mut params = ParamMap::new();
        params.insert("PxPayKey".to_string(), ParamValue::Missing("pxpay_key"));
        params.insert("PxPayKey".to_string(), ParamValue::from("override"));

        assert!(params_to_xml(&params, "GenerateRequest").is_ok());
    }

    #[test]
    fn nested_elements_are_flattened() {
        // PxPost wraps result fields inside a Transaction element.
        let body = br#"<Txn>
            <StatusRequired>0</StatusRequired>
            <Transaction success="1">
                <Authorized>1</Authorized>
                <CardName>Visa</CardName>
                <Empty></Empty>
            </Transaction>
        </Txn>"#;

        let document = parse_response(body).unwrap();
        assert_eq!(document.root(), "Txn");
        assert_eq!(document.text("Authorized"), Some("1"));
        assert_eq!(document.text("Empty"), None);

        let fields = document.non_empty_fields();
        assert_eq!(fields.get("CardName").map(String::as_str), Some("Visa"));
        assert!(!fields.contains_key("Empty"));
    }

    #[test]
    fn first_match_wins_in_document_order() {
        let body =
            br#"<Txn><TxnId>outer</TxnId><Transaction><TxnId>inner</TxnId></Transaction></Txn>"#;
        let document = parse_response(body).unwrap();
        assert_eq!(document.text("TxnId"), Some("outer"));
    }

    #[test]
    fn root_valid_attribute_is_captured() {
        let body = br#"<Response valid="1"><Success>1</Success></Response>"#;
        let document = parse_response(body).unwrap();
        assert_eq!(document.valid(), Some("1"));
        assert_eq!(document.text("Success"), Some("1"));
    }

    #[test]
    fn malformed_body_is_a_deserialization_failure() {
        let error = parse_response(b"<Txn><Authorized>1</Txn>").unwrap_err();
        assert_eq!(
            error.current_context(),
            &GatewayError::ResponseDeserializationFailed
        );
    }

    #[test]
    fn empty_body_is_a_deserialization_failure() {
        let error = parse_response(b"").unwrap_err();
        assert_eq!(
            error.current_context(),
            &GatewayError::ResponseDeserializationFailed
        );
    }
}
