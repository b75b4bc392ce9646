#![allow(dead_code)]

use std::fs::File;
use std::io::Read;
use std::io::Write;
use std::path::Path;

use assert_cmd::Command;
use insta_cmd::get_cargo_bin;
use tagmend_core::AnyEmptyResult;
use tagmend_core::AnyResult;
use zip::ZipArchive;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

pub const FRAGMENTED_NAME: &str = "<w:r><w:t>{</w:t></w:r><w:r><w:t>{</w:t></w:r><w:r><w:t>name</w:t></w:r><w:r><w:t>}</w:t></w:r><w:r><w:t>}</w:t></w:r>";

pub const FRAGMENTED_SQUARE: &str = "<w:r><w:t>[</w:t></w:r><w:r><w:t>[total]</w:t></w:r><w:r><w:t>]</w:t></w:r>";

pub fn tagmend_cmd() -> Command {
	let mut cmd = Command::new(get_cargo_bin("tagmend"));
	cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
	cmd
}

pub fn write_docx(path: &Path, document: &str) -> AnyEmptyResult {
	let mut writer = ZipWriter::new(File::create(path)?);

	writer.start_file("[Content_Types].xml", SimpleFileOptions::default())?;
	writer.write_all(b"<Types/>")?;
	writer.start_file("word/document.xml", SimpleFileOptions::default())?;
	writer.write_all(format!("<w:document><w:body><w:p>{document}</w:p></w:body></w:document>").as_bytes())?;
	writer.finish()?;

	Ok(())
}

pub fn read_document(path: &Path) -> AnyResult<String> {
	let mut archive = ZipArchive::new(File::open(path)?)?;
	let mut entry = archive.by_name("word/document.xml")?;
	let mut content = String::new();
	entry.read_to_string(&mut content)?;

	Ok(content)
}
