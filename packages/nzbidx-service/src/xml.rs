use quick_xml::{
	Writer,
	events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};

use crate::{Error, Result};

pub(crate) type XmlWriter = Writer<Vec<u8>>;

pub(crate) fn writer_with_declaration() -> Result<XmlWriter> {
	let mut writer = Writer::new(Vec::new());

	emit(&mut writer, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
	newline(&mut writer);

	Ok(writer)
}

pub(crate) fn emit(writer: &mut XmlWriter, event: Event<'_>) -> Result<()> {
	writer.write_event(event).map_err(|err| Error::Render { message: err.to_string() })
}

pub(crate) fn newline(writer: &mut XmlWriter) {
	writer.get_mut().push(b'\n');
}

pub(crate) fn start(writer: &mut XmlWriter, element: BytesStart<'_>) -> Result<()> {
	emit(writer, Event::Start(element))
}

pub(crate) fn end(writer: &mut XmlWriter, name: &str) -> Result<()> {
	emit(writer, Event::End(BytesEnd::new(name)))
}

pub(crate) fn text_element(writer: &mut XmlWriter, name: &str, text: &str) -> Result<()> {
	start(writer, BytesStart::new(name))?;
	emit(writer, Event::Text(BytesText::new(text)))?;

	end(writer, name)
}

pub(crate) fn finish(writer: XmlWriter) -> Result<String> {
	String::from_utf8(writer.into_inner()).map_err(|err| Error::Render { message: err.to_string() })
}
