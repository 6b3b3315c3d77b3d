//! Element kinds and tree structure for OSIS content.

/// One child of an element: mixed content is an ordered run of text leaves
/// and nested elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// Literal character data.
    Text(String),
    /// A nested element.
    Element(Node),
}

impl Content {
    /// Create a text leaf.
    pub fn text(s: impl Into<String>) -> Self {
        Content::Text(s.into())
    }
}

impl From<Node> for Content {
    fn from(node: Node) -> Self {
        Content::Element(node)
    }
}

/// An element in an OSIS document, tagged by kind.
///
/// Every kind except [`Node::Milestone`] owns an ordered sequence of
/// children. Ownership is a strict tree: no parent pointers, no sharing.
/// Vocabulary this version does not know lands in [`Node::Unknown`], which
/// keeps its children for re-serialization but exposes none of them to
/// traversal (see [`Node::children`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A verse of scripture (`verse`).
    Verse(Vec<Content>),
    /// A structural division: book, chapter, section (`div`).
    Div(Vec<Content>),
    /// An arbitrary inline segment (`seg`).
    Segment(Vec<Content>),
    /// An annotation or footnote (`note`).
    Note(Vec<Content>),
    /// A single word, usually carrying lexical markup (`w`).
    Word(Vec<Content>),
    /// A paragraph (`p`).
    Paragraph(Vec<Content>),
    /// A quotation (`q`).
    Quote(Vec<Content>),
    /// Translator-supplied change (`transChange`).
    TransChange(Vec<Content>),
    /// The speaker of a speech (`speaker`).
    Speaker(Vec<Content>),
    /// A speech (`speech`).
    Speech(Vec<Content>),
    /// A cross-reference (`reference`).
    Reference(Vec<Content>),
    /// The divine name (`divineName`).
    DivineName(Vec<Content>),
    /// A title or heading (`title`).
    Title(Vec<Content>),
    /// A list item (`item`).
    Item(Vec<Content>),
    /// Foreign-language text (`foreign`).
    Foreign(Vec<Content>),
    /// A list (`list`).
    List(Vec<Content>),
    /// A table; children are its rows (`table`).
    Table(Vec<Content>),
    /// A table row; children are its cells (`row`).
    Row(Vec<Content>),
    /// A table cell (`cell`).
    Cell(Vec<Content>),
    /// Highlighted text (`hi`).
    Highlight(Vec<Content>),
    /// A line of poetry (`l`).
    Line(Vec<Content>),
    /// A group of poetic lines (`lg`).
    LineGroup(Vec<Content>),
    /// A milestone marker (`milestone`). Always a leaf.
    Milestone,
    /// An element kind this version does not know. The name is kept for
    /// diagnostics and re-serialization.
    Unknown { name: String, children: Vec<Content> },
}

impl Node {
    /// Builds the kind matching a markup tag name; anything unrecognized
    /// becomes [`Node::Unknown`]. Milestones are leaves by definition, so
    /// any children handed to one are discarded.
    pub fn from_tag(name: &str, children: Vec<Content>) -> Self {
        match name {
            "verse" => Node::Verse(children),
            "div" => Node::Div(children),
            "seg" => Node::Segment(children),
            "note" => Node::Note(children),
            "w" => Node::Word(children),
            "p" => Node::Paragraph(children),
            "q" => Node::Quote(children),
            "transChange" => Node::TransChange(children),
            "speaker" => Node::Speaker(children),
            "speech" => Node::Speech(children),
            "reference" => Node::Reference(children),
            "divineName" => Node::DivineName(children),
            "title" => Node::Title(children),
            "item" => Node::Item(children),
            "foreign" => Node::Foreign(children),
            "list" => Node::List(children),
            "table" => Node::Table(children),
            "row" => Node::Row(children),
            "cell" => Node::Cell(children),
            "hi" => Node::Highlight(children),
            "l" => Node::Line(children),
            "lg" => Node::LineGroup(children),
            "milestone" => Node::Milestone,
            _ => Node::Unknown { name: name.to_string(), children },
        }
    }

    /// The markup tag name for this kind.
    pub fn tag(&self) -> &str {
        match self {
            Node::Verse(_) => "verse",
            Node::Div(_) => "div",
            Node::Segment(_) => "seg",
            Node::Note(_) => "note",
            Node::Word(_) => "w",
            Node::Paragraph(_) => "p",
            Node::Quote(_) => "q",
            Node::TransChange(_) => "transChange",
            Node::Speaker(_) => "speaker",
            Node::Speech(_) => "speech",
            Node::Reference(_) => "reference",
            Node::DivineName(_) => "divineName",
            Node::Title(_) => "title",
            Node::Item(_) => "item",
            Node::Foreign(_) => "foreign",
            Node::List(_) => "list",
            Node::Table(_) => "table",
            Node::Row(_) => "row",
            Node::Cell(_) => "cell",
            Node::Highlight(_) => "hi",
            Node::Line(_) => "l",
            Node::LineGroup(_) => "lg",
            Node::Milestone => "milestone",
            Node::Unknown { name, .. } => name,
        }
    }

    /// The ordered children this kind exposes to traversal.
    ///
    /// Milestones are leaves. Unknown kinds report the encounter and expose
    /// nothing, so one piece of unexpected vocabulary degrades that subtree
    /// instead of aborting a whole extraction.
    pub fn children(&self) -> &[Content] {
        match self {
            Node::Verse(children)
            | Node::Div(children)
            | Node::Segment(children)
            | Node::Note(children)
            | Node::Word(children)
            | Node::Paragraph(children)
            | Node::Quote(children)
            | Node::TransChange(children)
            | Node::Speaker(children)
            | Node::Speech(children)
            | Node::Reference(children)
            | Node::DivineName(children)
            | Node::Title(children)
            | Node::Item(children)
            | Node::Foreign(children)
            | Node::List(children)
            | Node::Table(children)
            | Node::Row(children)
            | Node::Cell(children)
            | Node::Highlight(children)
            | Node::Line(children)
            | Node::LineGroup(children) => children,
            Node::Milestone => &[],
            Node::Unknown { name, .. } => {
                tracing::warn!(element = %name, "unknown element kind, treating as empty");
                &[]
            }
        }
    }

    /// Pre-order iterator over every descendant element, not including
    /// `self`. Follows [`Node::children`], so milestone and unknown
    /// subtrees contribute nothing.
    pub fn descendants(&self) -> Descendants<'_> {
        let mut stack = Vec::new();
        push_element_children(&mut stack, self);
        Descendants { stack }
    }
}

fn push_element_children<'a>(stack: &mut Vec<&'a Node>, node: &'a Node) {
    for child in node.children().iter().rev() {
        if let Content::Element(el) = child {
            stack.push(el);
        }
    }
}

/// Iterator returned by [`Node::descendants`].
pub struct Descendants<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<&'a Node> {
        let node = self.stack.pop()?;
        push_element_children(&mut self.stack, node);
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_children_dispatch() {
        let verse = Node::Verse(vec![Content::text("In the beginning")]);
        assert_eq!(verse.children().len(), 1);

        assert!(Node::Milestone.children().is_empty());

        let unknown = Node::Unknown {
            name: "chapter".into(),
            children: vec![Content::text("hidden")],
        };
        assert!(unknown.children().is_empty(), "unknown kinds expose no children");
    }

    #[test]
    fn test_tag_round_trip() {
        let tags = [
            "verse", "div", "seg", "note", "w", "p", "q", "transChange", "speaker", "speech",
            "reference", "divineName", "title", "item", "foreign", "list", "table", "row", "cell",
            "hi", "l", "lg", "milestone",
        ];
        for tag in tags {
            let node = Node::from_tag(tag, Vec::new());
            assert_eq!(node.tag(), tag);
            assert!(!matches!(node, Node::Unknown { .. }), "{tag} parsed as unknown");
        }

        let other = Node::from_tag("figure", Vec::new());
        assert_eq!(other.tag(), "figure");
        assert!(matches!(other, Node::Unknown { .. }));
    }

    #[test]
    fn test_milestone_discards_children() {
        let node = Node::from_tag("milestone", vec![Content::text("x")]);
        assert_eq!(node, Node::Milestone);
    }

    #[test]
    fn test_descendants_pre_order() {
        let tree = Node::Div(vec![
            Node::Verse(vec![
                Content::text("a"),
                Node::Word(vec![Content::text("b")]).into(),
            ])
            .into(),
            Node::Note(vec![]).into(),
        ]);

        let tags: Vec<&str> = tree.descendants().map(Node::tag).collect();
        assert_eq!(tags, ["verse", "w", "note"]);
    }
}
