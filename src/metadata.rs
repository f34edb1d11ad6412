use serde::Serialize;

use crate::chapters::ChapterRecord;
use crate::escape::escape;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TagKey {
    Title,
    Author,
}

impl TagKey {
    /// Order in which global tags are written.
    pub const ORDER: [TagKey; 2] = [TagKey::Title, TagKey::Author];

    pub fn as_str(self) -> &'static str {
        match self {
            TagKey::Title => "title",
            TagKey::Author => "author",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub key: TagKey,
    pub value: String,
}

/// Global tags supplied by the caller, unescaped.
#[derive(Clone, Debug, Default)]
pub struct Tags {
    pub title: Option<String>,
    pub author: Option<String>,
}

impl Tags {
    pub fn get(&self, key: TagKey) -> Option<&str> {
        match key {
            TagKey::Title => self.title.as_deref(),
            TagKey::Author => self.author.as_deref(),
        }
    }
}

/// Everything a renderer needs. All text in here is already escaped.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MetadataDocument {
    tags: Vec<Tag>,
    chapters: Vec<ChapterRecord>,
}

impl MetadataDocument {
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn chapters(&self) -> &[ChapterRecord] {
        &self.chapters
    }
}

pub fn assemble(tags: &Tags, chapters: Vec<ChapterRecord>) -> MetadataDocument {
    let tags = TagKey::ORDER
        .into_iter()
        .filter_map(|key| {
            tags.get(key).map(|value| Tag {
                key,
                value: escape(value),
            })
        })
        .collect();

    let chapters = chapters
        .into_iter()
        .map(|mut chapter| {
            chapter.title = chapter.title.as_deref().map(escape);
            chapter
        })
        .collect();

    MetadataDocument { tags, chapters }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::ChapterTime;

    #[test]
    fn title_comes_before_author() {
        let tags = Tags {
            author: Some("Someone".into()),
            title: Some("Something".into()),
        };
        let doc = assemble(&tags, Vec::new());

        let keys: Vec<_> = doc.tags().iter().map(|t| t.key).collect();
        assert_eq!(keys, [TagKey::Title, TagKey::Author]);
    }

    #[test]
    fn unsupplied_tags_are_omitted() {
        let tags = Tags {
            title: None,
            author: Some("Someone".into()),
        };
        let doc = assemble(&tags, Vec::new());

        assert_eq!(
            doc.tags(),
            [Tag {
                key: TagKey::Author,
                value: "Someone".into()
            }]
        );
        assert!(assemble(&Tags::default(), Vec::new()).tags().is_empty());
    }

    #[test]
    fn tag_values_and_chapter_titles_are_escaped() {
        let tags = Tags {
            title: Some("A=B".into()),
            author: None,
        };
        let chapters = vec![
            ChapterRecord::new(Some("Part #1; intro"), ChapterTime::At(0), ChapterTime::At(1)),
            ChapterRecord::new(None, ChapterTime::At(1), ChapterTime::At(2)),
        ];
        let doc = assemble(&tags, chapters);

        assert_eq!(doc.tags()[0].value, "A\\=B");
        assert_eq!(doc.chapters()[0].title.as_deref(), Some("Part \\#1\\; intro"));
        assert_eq!(doc.chapters()[1].title, None);
        assert_eq!(doc.chapters()[1].start_time, ChapterTime::At(1));
    }
}
