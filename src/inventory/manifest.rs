use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::SweepError;

const INSTALLED_STATE: &str = "installed";

/// Identifiers of assets the manifest reports as installed.
#[derive(Debug, Default)]
pub struct UsageManifest {
    installed: HashSet<String>,
}

impl UsageManifest {
    pub fn load(path: &Path) -> Result<Self, SweepError> {
        let xml = fs::read_to_string(path).map_err(|e| SweepError::manifest(path, e))?;
        Self::parse(&xml).map_err(|reason| SweepError::manifest(path, reason))
    }

    /// Every element carrying both `assetId` and `state` is an asset.
    pub fn parse(xml: &str) -> Result<Self, String> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut installed = HashSet::new();
        let mut saw_root = false;
        let mut depth = 0usize;

        loop {
            let element = match reader.read_event() {
                Ok(Event::Start(e)) => {
                    depth += 1;
                    e
                },
                Ok(Event::Empty(e)) => e,
                Ok(Event::End(_)) => {
                    depth = depth.saturating_sub(1);
                    continue;
                },
                Ok(Event::Eof) if depth > 0 => {
                    return Err(format!("document ends with {depth} unclosed element(s)"));
                },
                Ok(Event::Eof) => break,
                Ok(_) => continue,
                Err(e) => return Err(format!("malformed XML at byte {}: {}", reader.error_position(), e)),
            };

            saw_root = true;
            if let Some((id, state)) = asset_attributes(&element)? {
                if state == INSTALLED_STATE {
                    installed.insert(id);
                }
            }
        }

        if !saw_root {
            return Err("document has no root element".to_string());
        }

        debug!(installed = installed.len(), "parsed asset manifest");
        Ok(Self { installed })
    }

    pub fn is_installed(&self, id: &str) -> bool {
        self.installed.contains(id)
    }

    pub fn len(&self) -> usize {
        self.installed.len()
    }
}

fn asset_attributes(element: &BytesStart<'_>) -> Result<Option<(String, String)>, String> {
    let mut id = None;
    let mut state = None;

    for attr in element.attributes() {
        let attr = attr.map_err(|e| e.to_string())?;
        let value = attr.unescape_value().map_err(|e| e.to_string())?;
        match attr.key.as_ref() {
            b"assetId" => id = Some(value.into_owned()),
            b"state" => state = Some(value.into_owned()),
            _ => {},
        }
    }

    Ok(id.zip(state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<assets>
    <asset assetId="A" state="installed"/>
    <asset assetId="B" state="downloading"/>
    <asset assetId="C" state="installed"></asset>
    <asset state="installed"/>
</assets>"#;

    #[test]
    fn test_only_installed_assets_are_collected() {
        let manifest = UsageManifest::parse(SAMPLE).unwrap();
        assert!(manifest.is_installed("A"));
        assert!(manifest.is_installed("C"));
        assert!(!manifest.is_installed("B"));
        assert_eq!(manifest.len(), 2);
    }

    #[test]
    fn test_empty_root_is_valid() {
        let manifest = UsageManifest::parse("<assets/>").unwrap();
        assert_eq!(manifest.len(), 0);
    }

    #[test]
    fn test_malformed_xml_is_rejected() {
        assert!(UsageManifest::parse("<assets><asset assetId=\"A\" state=\"installed\"></assets>").is_err());
        assert!(UsageManifest::parse("").is_err());
    }

    #[test]
    fn test_truncated_document_is_rejected() {
        let err = UsageManifest::parse("<assets><asset assetId=\"A\" state=\"installed\"/>").unwrap_err();
        assert!(err.contains("unclosed"), "{err}");
        assert!(UsageManifest::parse("<assets><asset assetId=\"A\" state=\"installed\">").is_err());
    }

    #[test]
    fn test_missing_file_is_manifest_unavailable() {
        let tmp = TempDir::new().unwrap();
        let err = UsageManifest::load(&tmp.path().join("missing.xml")).unwrap_err();
        assert!(matches!(err, SweepError::ManifestUnavailable { .. }));
    }
}
