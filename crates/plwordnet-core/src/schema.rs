//! Schema ingestion: XML source document to raw records

use crate::entity::{
    Language, LexicalUnitId, PartOfSpeech, RelationType, RelationTypeId, Synset, SynsetId,
};
use crate::error::{Error, Result};
use crate::store::Triple;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;
use std::io::BufRead;
use std::str::FromStr;

const RELATION_TYPE: &str = "relationtypes";
const LEXICAL_UNIT: &str = "lexical-unit";
const SYNSET: &str = "synset";
const UNIT_ID: &str = "unit-id";
const SYNSET_RELATION: &str = "synsetrelations";
const LEXICAL_RELATION: &str = "lexicalrelations";

/// Lexical unit as read from the source, before it is attached to a synset
#[derive(Debug, Clone, PartialEq)]
pub struct RawLexicalUnit {
    pub id: LexicalUnitId,
    pub name: String,
    pub variant: u32,
    pub tag_count: u32,
    pub pos: PartOfSpeech,
    pub language: Language,
    pub domain: String,
    pub description: String,
}

/// Unlinked records in source order.
///
/// Relation type `parent`/`inverse` ids and synset member ids are taken
/// verbatim and may point at records that do not exist.
#[derive(Debug, Clone, Default)]
pub struct RawWordnet {
    pub relation_types: Vec<RelationType>,
    pub lexical_units: Vec<RawLexicalUnit>,
    pub synsets: Vec<Synset>,
    pub synset_relations: Vec<Triple<SynsetId>>,
    pub lexical_relations: Vec<Triple<LexicalUnitId>>,
}

impl RawWordnet {
    /// Read every record from an XML document.
    ///
    /// The whole document is consumed before returning.
    pub fn from_xml<R: BufRead>(source: R) -> Result<Self> {
        let mut reader = Reader::from_reader(source);
        reader.config_mut().trim_text(true);

        let mut raw = Self::default();
        let mut buf = Vec::new();
        let mut open_synset: Option<Synset> = None;
        let mut in_unit_id = false;

        loop {
            let position = reader.buffer_position() as u64;
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => {
                    let name = e.name();
                    match name.as_ref() {
                        b"synset" => open_synset = Some(Record::read(SYNSET, position, &e)?.synset()?),
                        b"unit-id" => in_unit_id = open_synset.is_some(),
                        _ => raw.read_leaf(&e, position)?,
                    }
                }
                Event::Empty(e) => match e.name().as_ref() {
                    b"synset" => raw.synsets.push(Record::read(SYNSET, position, &e)?.synset()?),
                    _ => raw.read_leaf(&e, position)?,
                },
                Event::Text(text) if in_unit_id => {
                    let text = text.unescape()?;
                    let id = text.trim().parse::<u32>().map_err(|_| {
                        Error::schema(
                            format!("<{}> at byte {}", UNIT_ID, position),
                            format!("invalid unit id '{}'", text.trim()),
                        )
                    })?;
                    if let Some(synset) = open_synset.as_mut() {
                        synset.lexical_units.push(LexicalUnitId(id));
                    }
                }
                Event::End(e) => match e.name().as_ref() {
                    b"synset" => {
                        if let Some(synset) = open_synset.take() {
                            raw.synsets.push(synset);
                        }
                    }
                    b"unit-id" => in_unit_id = false,
                    _ => {}
                },
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        tracing::info!(
            "Read {} relation types, {} lexical units, {} synsets, {} synset relations, {} lexical relations",
            raw.relation_types.len(),
            raw.lexical_units.len(),
            raw.synsets.len(),
            raw.synset_relations.len(),
            raw.lexical_relations.len()
        );

        Ok(raw)
    }

    /// Elements that carry everything in their attributes
    fn read_leaf(&mut self, e: &BytesStart<'_>, position: u64) -> Result<()> {
        match e.name().as_ref() {
            b"relationtypes" => {
                let relation_type = Record::read(RELATION_TYPE, position, e)?.relation_type()?;
                self.relation_types.push(relation_type);
            }
            b"lexical-unit" => {
                let unit = Record::read(LEXICAL_UNIT, position, e)?.lexical_unit()?;
                self.lexical_units.push(unit);
            }
            b"synsetrelations" => {
                let (s, p, o) = Record::read(SYNSET_RELATION, position, e)?.triple()?;
                self.synset_relations
                    .push(Triple::new(SynsetId(s), RelationTypeId(p), SynsetId(o)));
            }
            b"lexicalrelations" => {
                let (s, p, o) = Record::read(LEXICAL_RELATION, position, e)?.triple()?;
                self.lexical_relations.push(Triple::new(
                    LexicalUnitId(s),
                    RelationTypeId(p),
                    LexicalUnitId(o),
                ));
            }
            _ => {}
        }
        Ok(())
    }
}

/// Attributes of one element, with enough context to report schema errors
struct Record {
    element: &'static str,
    position: u64,
    attrs: HashMap<String, String>,
}

impl Record {
    fn read(element: &'static str, position: u64, e: &BytesStart<'_>) -> Result<Self> {
        let mut attrs = HashMap::new();
        for attr in e.attributes() {
            let attr = attr.map_err(quick_xml::Error::from)?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value()?.into_owned();
            attrs.insert(key, value);
        }
        Ok(Self {
            element,
            position,
            attrs,
        })
    }

    fn context(&self) -> String {
        match self.attrs.get("id") {
            Some(id) => format!("<{} id=\"{}\"> at byte {}", self.element, id, self.position),
            None => format!("<{}> at byte {}", self.element, self.position),
        }
    }

    fn required(&self, key: &str) -> Result<&str> {
        self.attrs.get(key).map(String::as_str).ok_or_else(|| {
            Error::schema(
                self.context(),
                format!("missing required attribute '{}'", key),
            )
        })
    }

    fn parse_value<T: FromStr>(&self, key: &str, value: &str) -> Result<T> {
        value.trim().parse::<T>().map_err(|_| {
            Error::schema(
                self.context(),
                format!("invalid value '{}' for attribute '{}'", value, key),
            )
        })
    }

    fn required_num<T: FromStr>(&self, key: &str) -> Result<T> {
        let value = self.required(key)?;
        self.parse_value(key, value)
    }

    fn optional_num<T: FromStr>(&self, key: &str) -> Result<Option<T>> {
        match self.attrs.get(key) {
            Some(value) if !value.trim().is_empty() => self.parse_value(key, value).map(Some),
            _ => Ok(None),
        }
    }

    fn text(&self, key: &str) -> String {
        self.attrs.get(key).cloned().unwrap_or_default()
    }

    fn flag(&self, key: &str) -> bool {
        self.attrs.get(key).is_some_and(|v| v.trim() == "true")
    }

    fn part_of_speech(&self, label: &str) -> Result<(PartOfSpeech, Language)> {
        PartOfSpeech::from_label(label).ok_or_else(|| {
            Error::schema(
                self.context(),
                format!("unknown part of speech '{}'", label),
            )
        })
    }

    fn relation_type(&self) -> Result<RelationType> {
        let pos = self
            .text("posstr")
            .split(',')
            .map(str::trim)
            .filter(|label| !label.is_empty())
            .map(|label| self.part_of_speech(label).map(|(pos, _)| pos))
            .collect::<Result<Vec<_>>>()?;

        Ok(RelationType {
            id: RelationTypeId(self.required_num("id")?),
            parent: self.optional_num("parent")?.map(RelationTypeId),
            inverse: self.optional_num("reverse")?.map(RelationTypeId),
            name: self.required("name")?.to_string(),
            kind: self.required("type")?.to_string(),
            description: self.text("description"),
            shortcut: self.text("shortcut"),
            display: self.text("display"),
            pos,
            auto_reverse: self.flag("autoreverse"),
        })
    }

    fn lexical_unit(&self) -> Result<RawLexicalUnit> {
        let (pos, language) = self.part_of_speech(self.required("pos")?)?;
        Ok(RawLexicalUnit {
            id: LexicalUnitId(self.required_num("id")?),
            name: self.required("name")?.to_string(),
            variant: self.required_num("variant")?,
            tag_count: self.optional_num("tagcount")?.unwrap_or(0),
            pos,
            language,
            domain: self.text("domain"),
            description: self.text("desc"),
        })
    }

    fn synset(&self) -> Result<Synset> {
        Ok(Synset {
            id: SynsetId(self.required_num("id")?),
            definition: self.text("definition"),
            description: self.text("desc"),
            is_abstract: self.flag("abstract"),
            split: self.optional_num("split")?.unwrap_or(0),
            lexical_units: Vec::new(),
        })
    }

    fn triple(&self) -> Result<(u32, u32, u32)> {
        Ok((
            self.required_num("parent")?,
            self.required_num("relation")?,
            self.required_num("child")?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r###"<?xml version="1.0" encoding="UTF-8"?>
<array-list>
  <lexical-unit id="1" name="kot" pos="rzeczownik" tagcount="12" domain="zw" desc="##D: ssak." variant="1"/>
  <lexical-unit id="2" name="cat" pos="rzeczownik pwn" tagcount="0" domain="zw" desc="" variant="1"/>
  <synset id="10" split="1" abstract="false" definition="kot domowy">
    <unit-id>1</unit-id>
    <unit-id>2</unit-id>
  </synset>
  <synset id="11" split="0" abstract="true"/>
  <relationtypes id="1" name="hiperonimia" type="relacja synsetów" posstr="rzeczownik,czasownik pwn" description="" shortcut="hiper" display="&lt;x#&gt; to &lt;y#&gt;" autoreverse="false" reverse="2"/>
  <lexicalrelations parent="1" relation="5" child="2"/>
  <synsetrelations parent="10" relation="1" child="11"/>
</array-list>"###;

    #[test]
    fn test_read_document() {
        let raw = RawWordnet::from_xml(DOC.as_bytes()).unwrap();

        assert_eq!(raw.lexical_units.len(), 2);
        assert_eq!(raw.lexical_units[0].name, "kot");
        assert_eq!(raw.lexical_units[0].tag_count, 12);
        assert_eq!(raw.lexical_units[0].language, Language::Polish);
        assert_eq!(raw.lexical_units[1].language, Language::English);

        assert_eq!(raw.synsets.len(), 2);
        assert_eq!(
            raw.synsets[0].lexical_units,
            vec![LexicalUnitId(1), LexicalUnitId(2)]
        );
        assert_eq!(raw.synsets[0].definition, "kot domowy");
        assert!(!raw.synsets[0].is_abstract);
        assert!(raw.synsets[1].is_abstract);

        let rel = &raw.relation_types[0];
        assert_eq!(rel.inverse, Some(RelationTypeId(2)));
        assert_eq!(rel.parent, None);
        assert_eq!(rel.display, "<x#> to <y#>");
        assert_eq!(rel.pos, vec![PartOfSpeech::Noun, PartOfSpeech::Verb]);
        assert!(!rel.auto_reverse);

        assert_eq!(
            raw.synset_relations,
            vec![Triple::new(SynsetId(10), RelationTypeId(1), SynsetId(11))]
        );
        assert_eq!(raw.lexical_relations.len(), 1);
    }

    #[test]
    fn test_missing_required_attribute() {
        let doc = r#"<array-list><lexical-unit id="7" pos="rzeczownik" variant="1"/></array-list>"#;
        let err = RawWordnet::from_xml(doc.as_bytes()).unwrap_err();
        assert!(err.is_schema());
        let message = err.to_string();
        assert!(message.contains("lexical-unit"));
        assert!(message.contains("'name'"));
    }

    #[test]
    fn test_invalid_number() {
        let doc = r#"<array-list><synsetrelations parent="x" relation="1" child="2"/></array-list>"#;
        let err = RawWordnet::from_xml(doc.as_bytes()).unwrap_err();
        assert!(err.is_schema());
    }

    #[test]
    fn test_unknown_part_of_speech() {
        let doc = r#"<array-list><lexical-unit id="1" name="i" pos="spójnik" variant="1"/></array-list>"#;
        let err = RawWordnet::from_xml(doc.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("spójnik"));
    }
}
