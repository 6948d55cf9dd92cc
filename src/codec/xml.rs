use failure::Fail;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::error::*;
use models::Attributes;

/// Root element of a gateway response, e.g. `<Init Success="True" SessionId="..."/>`
#[derive(Clone, Debug, PartialEq)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Attributes,
}

/// Reads the name and attributes of the document's root element. Children are ignored.
pub fn parse_xml_attributes(body: &str) -> Result<XmlElement, Error> {
    let mut reader = Reader::from_str(body);
    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => return read_element(e),
            Ok(Event::Eof) => return Err(ectx!(err format_err!("no root element"), ErrorKind::EmptyDocument => body)),
            Ok(_) => {}
            Err(e) => return Err(ectx!(err e, ErrorSource::QuickXml, ErrorKind::MalformedInput => body)),
        }
    }
}

fn read_element(element: &BytesStart) -> Result<XmlElement, Error> {
    let name = String::from_utf8_lossy(element.name().as_ref()).into_owned();
    let mut attributes = Attributes::new();
    for attr in element.attributes() {
        let attr = attr.map_err({
            let name = name.clone();
            ectx!(try ErrorSource::QuickXml, ErrorKind::MalformedInput => name)
        })?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err({
                let (name, key) = (name.clone(), key.clone());
                ectx!(try ErrorSource::QuickXml, ErrorKind::MalformedInput => name, key)
            })?
            .into_owned();
        attributes.insert(key, value);
    }
    Ok(XmlElement { name, attributes })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_root_attributes() {
        let body = r#"<?xml version="1.0" encoding="utf-8"?>
            <Init Success="True" OrderId="ABC123" Amount="50000" SessionId="SESS1" />"#;
        let element = parse_xml_attributes(body).unwrap();

        assert_eq!(element.name, "Init");
        assert_eq!(element.attributes.get("Success"), Some("True"));
        assert_eq!(element.attributes.get("SessionId"), Some("SESS1"));
        assert_eq!(element.attributes.len(), 4);
    }

    #[test]
    fn unescapes_entities_and_ignores_children() {
        let body = r#"<PayStatus Success="False" ErrCode="A&amp;B"><AddInfo Key="x" /></PayStatus>"#;
        let element = parse_xml_attributes(body).unwrap();

        assert_eq!(element.name, "PayStatus");
        assert_eq!(element.attributes.get("ErrCode"), Some("A&B"));
        assert_eq!(element.attributes.get("Key"), None);
    }

    #[test]
    fn empty_document_is_an_error() {
        let err = parse_xml_attributes("   ").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptyDocument);
    }
}
