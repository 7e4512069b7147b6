//! Element tree types.

/// A node in the element tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub const fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(el) => Some(el),
            Self::Text(_) => None,
        }
    }

    pub const fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Self::Element(el) => Some(el),
            Self::Text(_) => None,
        }
    }

    /// Concatenated text of this node and its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Text(text) => out.push_str(text),
            Self::Element(el) => {
                for child in &el.children {
                    child.collect_text(out);
                }
            }
        }
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Self::Element(el)
    }
}

/// An element with ordered attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    #[must_use]
    pub fn with_id(self, id: impl Into<String>) -> Self {
        self.with_attr("id", id)
    }

    #[must_use]
    pub fn with_class(self, class: impl Into<String>) -> Self {
        self.with_attr("class", class)
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn push(&mut self, child: impl Into<Node>) {
        self.children.push(child.into());
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set an attribute, replacing an existing value in place.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(slot) = self.attrs.iter_mut().find(|(key, _)| *key == name) {
            slot.1 = value;
        } else {
            self.attrs.push((name, value));
        }
    }

    pub fn remove_attr(&mut self, name: &str) {
        self.attrs.retain(|(key, _)| key != name);
    }

    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    pub fn add_class(&mut self, class: &str) {
        if self.has_class(class) {
            return;
        }
        let classes = match self.attr("class") {
            Some(existing) if !existing.trim().is_empty() => format!("{existing} {class}"),
            _ => class.to_string(),
        };
        self.set_attr("class", classes);
    }

    pub fn remove_class(&mut self, class: &str) {
        let Some(existing) = self.attr("class") else {
            return;
        };
        let remaining = existing
            .split_whitespace()
            .filter(|c| *c != class)
            .collect::<Vec<_>>()
            .join(" ");
        if remaining.is_empty() {
            self.remove_attr("class");
        } else {
            self.set_attr("class", remaining);
        }
    }

    /// Replace all children with a single text node.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.children = vec![Node::Text(text.into())];
    }

    pub fn clear(&mut self) {
        self.children.clear();
    }

    pub fn text_content(&self) -> String {
        self.children.iter().map(Node::text_content).collect()
    }

    /// Child elements, skipping text.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// First descendant (pre-order, excluding `self`) matching `pred`.
    pub fn find(&self, pred: &dyn Fn(&Self) -> bool) -> Option<&Self> {
        for child in self.child_elements() {
            if pred(child) {
                return Some(child);
            }
            if let Some(found) = child.find(pred) {
                return Some(found);
            }
        }
        None
    }

    /// Mutable variant of [`Element::find`].
    pub fn find_mut(&mut self, pred: &dyn Fn(&Self) -> bool) -> Option<&mut Self> {
        for child in &mut self.children {
            let Some(child) = child.as_element_mut() else {
                continue;
            };
            if pred(child) {
                return Some(child);
            }
            if let Some(found) = child.find_mut(pred) {
                return Some(found);
            }
        }
        None
    }

    /// Element with the given id; the first one in document order wins.
    pub fn find_by_id(&self, id: &str) -> Option<&Self> {
        self.find(&|el| el.id() == Some(id))
    }

    pub fn find_by_id_mut(&mut self, id: &str) -> Option<&mut Self> {
        self.find_mut(&|el| el.id() == Some(id))
    }

    /// Visit every descendant element mutably, in document order.
    pub fn for_each_mut(&mut self, visit: &mut dyn FnMut(&mut Self)) {
        for child in &mut self.children {
            if let Node::Element(el) = child {
                visit(el);
                el.for_each_mut(visit);
            }
        }
    }
}
