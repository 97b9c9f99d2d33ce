//! Response wrapper with decoded-body accessors.

use bytes::Bytes;
use http::{HeaderMap, StatusCode};
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::ParseError;

/// Wraps the raw transport response and exposes decoded-body accessors.
///
/// Immutable: constructed once when the transport returns and never modified.
#[derive(Debug)]
pub struct HttpResponse {
	inner: http::Response<Bytes>,
}

impl HttpResponse {
	pub fn new(inner: http::Response<Bytes>) -> Self {
		Self { inner }
	}

	pub fn status(&self) -> StatusCode {
		self.inner.status()
	}

	pub fn headers(&self) -> &HeaderMap {
		self.inner.headers()
	}

	pub fn body(&self) -> &Bytes {
		self.inner.body()
	}

	/// The body decoded as UTF-8, lossily.
	pub fn body_text(&self) -> String {
		String::from_utf8_lossy(self.inner.body()).into_owned()
	}

	/// Parses the body as JSON.
	pub fn json(&self) -> Result<serde_json::Value, ParseError> {
		serde_json::from_slice(self.inner.body()).map_err(|e| ParseError::Json(e.to_string()))
	}

	/// Parses the body as XML into an element tree.
	///
	/// External entities are never resolved: DTD declarations are skipped and
	/// entity references without a built-in expansion are left verbatim in the
	/// text, so no local resource can leak into the parsed result. An empty
	/// body parses as an empty `root` element.
	pub fn xml(&self) -> Result<XmlElement, ParseError> {
		let body = self.inner.body();
		if body.iter().all(|b| b.is_ascii_whitespace()) {
			return Ok(XmlElement::named("root"));
		}
		parse_xml(body)
	}
}

/// A parsed XML element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct XmlElement {
	pub name: String,
	pub attributes: Vec<(String, String)>,
	pub children: Vec<XmlElement>,
	pub text: String,
}

impl XmlElement {
	fn named(name: &str) -> Self {
		Self {
			name: name.to_string(),
			..Self::default()
		}
	}

	/// First child with the given element name.
	pub fn child(&self, name: &str) -> Option<&XmlElement> {
		self.children.iter().find(|c| c.name == name)
	}

	/// Attribute value by name.
	pub fn attribute(&self, name: &str) -> Option<&str> {
		self.attributes
			.iter()
			.find(|(n, _)| n == name)
			.map(|(_, v)| v.as_str())
	}
}

fn parse_xml(body: &[u8]) -> Result<XmlElement, ParseError> {
	let mut reader = Reader::from_reader(body);
	reader.config_mut().trim_text(true);

	let mut stack: Vec<XmlElement> = Vec::new();
	let mut root: Option<XmlElement> = None;
	let mut buf = Vec::new();

	loop {
		match reader.read_event_into(&mut buf) {
			Ok(Event::Start(start)) => {
				let element = open_element(&start)?;
				stack.push(element);
			}
			Ok(Event::Empty(start)) => {
				let element = open_element(&start)?;
				attach(&mut stack, &mut root, element)?;
			}
			Ok(Event::End(_)) => {
				let element = stack
					.pop()
					.ok_or_else(|| ParseError::Xml("unexpected closing tag".to_string()))?;
				attach(&mut stack, &mut root, element)?;
			}
			Ok(Event::Text(text)) => {
				// Text with an unknown entity reference fails to unescape;
				// keep it verbatim instead of resolving anything.
				let decoded = match text.unescape() {
					Ok(cow) => cow.into_owned(),
					Err(_) => String::from_utf8_lossy(text.as_ref()).into_owned(),
				};
				if let Some(current) = stack.last_mut() {
					current.text.push_str(&decoded);
				}
			}
			Ok(Event::CData(cdata)) => {
				if let Some(current) = stack.last_mut() {
					current
						.text
						.push_str(&String::from_utf8_lossy(cdata.as_ref()));
				}
			}
			// DTDs (and any entity definitions inside them) are ignored.
			Ok(Event::DocType(_) | Event::Decl(_) | Event::PI(_) | Event::Comment(_)) => {}
			Ok(Event::Eof) => break,
			Err(e) => return Err(ParseError::Xml(e.to_string())),
		}
		buf.clear();
	}

	if !stack.is_empty() {
		return Err(ParseError::Xml("unclosed element".to_string()));
	}

	root.ok_or_else(|| ParseError::Xml("missing root element".to_string()))
}

fn open_element(start: &quick_xml::events::BytesStart<'_>) -> Result<XmlElement, ParseError> {
	let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
	let mut element = XmlElement::named(&name);

	for attribute in start.attributes() {
		let attribute = attribute.map_err(|e| ParseError::Xml(e.to_string()))?;
		let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
		let value = match attribute.unescape_value() {
			Ok(cow) => cow.into_owned(),
			Err(_) => String::from_utf8_lossy(&attribute.value).into_owned(),
		};
		element.attributes.push((key, value));
	}

	Ok(element)
}

fn attach(
	stack: &mut Vec<XmlElement>,
	root: &mut Option<XmlElement>,
	element: XmlElement,
) -> Result<(), ParseError> {
	match stack.last_mut() {
		Some(parent) => parent.children.push(element),
		None => {
			if root.is_some() {
				return Err(ParseError::Xml("multiple root elements".to_string()));
			}
			*root = Some(element);
		}
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	fn response(body: &str) -> HttpResponse {
		HttpResponse::new(
			http::Response::builder()
				.status(200)
				.body(Bytes::from(body.to_string()))
				.unwrap(),
		)
	}

	#[test]
	fn json_body_decodes() {
		let data = response("{\"status\":\"approved\",\"amount\":\"10.00\"}")
			.json()
			.unwrap();
		assert_eq!(data["status"], "approved");
	}

	#[test]
	fn invalid_json_is_a_parse_error() {
		let err = response("not json").json().unwrap_err();
		assert!(matches!(err, ParseError::Json(_)));
		assert!(err.to_string().contains("JSON"));
	}

	#[test]
	fn xml_body_decodes() {
		let doc = response("<result code=\"00\"><message>OK</message></result>")
			.xml()
			.unwrap();
		assert_eq!(doc.name, "result");
		assert_eq!(doc.attribute("code"), Some("00"));
		assert_eq!(doc.child("message").unwrap().text, "OK");
	}

	#[test]
	fn empty_body_parses_as_empty_root() {
		let doc = response("").xml().unwrap();
		assert_eq!(doc.name, "root");
		assert!(doc.children.is_empty());
	}

	#[test]
	fn invalid_xml_is_a_parse_error() {
		let err = response("<open><unclosed>").xml().unwrap_err();
		assert!(matches!(err, ParseError::Xml(_)));
	}

	#[test]
	fn external_entities_are_not_resolved() {
		let body = "<?xml version=\"1.0\"?>\
			<!DOCTYPE data [<!ENTITY xxe SYSTEM \"file:///etc/passwd\">]>\
			<data>&xxe;</data>";
		match response(body).xml() {
			// Either outcome is acceptable, as long as no file content
			// appears in the parsed result.
			Ok(doc) => {
				assert!(!doc.text.contains("root:"));
				assert!(doc.text == "&xxe;" || doc.text.is_empty());
			}
			Err(ParseError::Xml(_)) => {}
			Err(other) => panic!("unexpected error: {other}"),
		}
	}

	#[test]
	fn unknown_entity_references_stay_verbatim() {
		let doc = response("<note>&custom;</note>").xml().unwrap();
		assert_eq!(doc.text, "&custom;");
	}

	#[test]
	fn cdata_is_kept_verbatim() {
		let doc = response("<note><![CDATA[a < b]]></note>").xml().unwrap();
		assert_eq!(doc.text, "a < b");
	}
}
