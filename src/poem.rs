//! Poem records as served by the poems API.
//!
//! # Payload
//!
//! ```text
//! { "id": 1, "title": "...", "content": "line\nline\n\nline", "author": "...", "color": "#bd92fc" }
//! ```
//!
//! `content` is newline-delimited. Each line becomes its own paragraph on the
//! card and blank lines become spacer rows, see [`PoemRecord::content_lines`].

use serde::{Deserialize, Serialize};

use crate::config::Variant;

/// One displayable poem
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoemRecord {
    /// Server id, also the render key
    pub id: i64,
    pub title: String,
    /// Newline-delimited stanza lines
    pub content: String,
    #[serde(default)]
    pub author: String,
    /// CSS color string (named or hex). Empty when the server omits it.
    #[serde(default)]
    pub color: String,
}

/// A single rendered line of poem content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentLine<'a> {
    Text(&'a str),
    /// Blank line between stanzas
    Spacer,
}

impl PoemRecord {
    /// Split content into paragraph lines.
    ///
    /// `"A\n\nB"` yields `Text("A")`, `Spacer`, `Text("B")`. Carriage returns
    /// from CRLF payloads are dropped. A line containing only whitespace is a
    /// spacer.
    pub fn content_lines(&self) -> Vec<ContentLine<'_>> {
        self.content
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .map(|line| {
                if line.trim().is_empty() {
                    ContentLine::Spacer
                } else {
                    ContentLine::Text(line)
                }
            })
            .collect()
    }

    /// Copy of this record with a different color
    pub fn with_color(&self, color: impl Into<String>) -> Self {
        Self {
            color: color.into(),
            ..self.clone()
        }
    }
}

/// Sample poems shown when the API can't be reached
pub fn fallback_poems(variant: Variant) -> Vec<PoemRecord> {
    let mut poems = vec![
        PoemRecord {
            id: 1,
            title: "Siempre tú".to_string(),
            content: "Siempre fuiste el sonido de las olas que calma mi corazon \
                      cuando los vientos de la vida golpean fuerte."
                .to_string(),
            author: "RapsodAz".to_string(),
            color: "purple".to_string(),
        },
        PoemRecord {
            id: 2,
            title: "Odisea".to_string(),
            content: "No se como llegamos al punto donde necesite de ti para poder sonreir, \
                      donde todo lo que pasamos no fue mas que un efimero adios \
                      que nunca supimos pronunciar."
                .to_string(),
            author: "RapsodAz".to_string(),
            color: "#bd92fc".to_string(),
        },
    ];

    if variant == Variant::Evolved {
        poems.push(PoemRecord {
            id: 3,
            title: "Ausencia".to_string(),
            content: "Te busqué en la lluvia de abril\n\
                      y en el silencio de la tarde.\n\
                      \n\
                      Solo encontré tu nombre\n\
                      escrito en el vaho del cristal."
                .to_string(),
            author: "RapsodAz".to_string(),
            color: "#5e5e97".to_string(),
        });
    }

    poems
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn poem(content: &str) -> PoemRecord {
        PoemRecord {
            id: 7,
            title: "T".to_string(),
            content: content.to_string(),
            author: "X".to_string(),
            color: "red".to_string(),
        }
    }

    #[test]
    fn test_content_lines_with_spacer() {
        let p = poem("A\n\nB");
        assert_eq!(
            p.content_lines(),
            vec![ContentLine::Text("A"), ContentLine::Spacer, ContentLine::Text("B")]
        );
    }

    #[test]
    fn test_content_lines_crlf() {
        let p = poem("L1\r\nL2");
        assert_eq!(
            p.content_lines(),
            vec![ContentLine::Text("L1"), ContentLine::Text("L2")]
        );
    }

    #[test]
    fn test_single_line() {
        let p = poem("solo una linea");
        assert_eq!(p.content_lines(), vec![ContentLine::Text("solo una linea")]);
    }

    #[test]
    fn test_with_color_keeps_other_fields() {
        let p = poem("L1");
        let recolored = p.with_color("#17ad92");
        assert_eq!(recolored.color, "#17ad92");
        assert_eq!(recolored.id, p.id);
        assert_eq!(recolored.title, p.title);
        assert_eq!(recolored.content, p.content);
        assert_eq!(recolored.author, p.author);
    }

    #[test]
    fn test_deserialize_missing_color() {
        let p: PoemRecord =
            serde_json::from_str(r#"{"id":3,"title":"T","content":"c","author":"A"}"#).unwrap();
        assert_eq!(p.color, "");
    }

    #[test]
    fn test_fallback_sizes() {
        assert_eq!(fallback_poems(Variant::Original).len(), 2);
        assert_eq!(fallback_poems(Variant::Evolved).len(), 3);
    }

    #[test]
    fn test_fallback_ids_unique() {
        let poems = fallback_poems(Variant::Evolved);
        let ids: HashSet<i64> = poems.iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), poems.len());
    }
}
