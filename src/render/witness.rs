//! Witness sigla card in the sidebar.

use crate::markup::{Element, Node};
use crate::payload::Witness;

pub const WITNESS_CARD_CLASS: &str = "witnesses";
pub const WITNESS_CARD_TITLE: &str = "Witnesses";

/// Siglum that marks the editor's own reconstruction.
const EDITORIAL_SIGLUM: &str = "AI";

/// Fictitious witnesses shown when the payload lists none.
pub fn fallback_witnesses() -> Vec<Witness> {
    vec![
        Witness::new("A", "Codex Atheniensis, s. X (fictitious)"),
        Witness::new("B", "Codex Bodmerianus, s. XII (fictitious)"),
        Witness::new("C", "Papyrus Cantabrigiensis, s. II (fictitious)"),
        Witness::new("AI", "Machine-assisted editorial reconstruction"),
    ]
}

/// Payload witnesses when non-empty, the fallback set otherwise.
pub fn resolve_witnesses(from_payload: &[Witness]) -> Vec<Witness> {
    if from_payload.is_empty() {
        fallback_witnesses()
    } else {
        from_payload.to_vec()
    }
}

/// Display form of a siglum.
pub fn display_siglum(id: &str) -> String {
    if id == EDITORIAL_SIGLUM {
        format!("{id} (ed.)")
    } else {
        id.to_string()
    }
}

/// Render `witnesses` into the card inside `sidebar`, creating the card on
/// first use. Does nothing without a sidebar.
pub fn render_witness_panel(sidebar: Option<&mut Element>, witnesses: &[Witness]) {
    let Some(sidebar) = sidebar else {
        tracing::debug!("no sidebar; witness panel skipped");
        return;
    };
    let Some(host) = witness_host(sidebar) else {
        return;
    };
    host.clear();
    if witnesses.is_empty() {
        return;
    }
    for witness in witnesses {
        host.push(Element::new("dt").with_text(display_siglum(&witness.id)));
        host.push(Element::new("dd").with_text(witness.text.clone()));
    }
}

fn witness_host(sidebar: &mut Element) -> Option<&mut Element> {
    if !sidebar.child_elements().any(|el| el.has_class(WITNESS_CARD_CLASS)) {
        sidebar.push(
            Element::new("section")
                .with_class(format!("card {WITNESS_CARD_CLASS}"))
                .with_child(Element::new("h3").with_text(WITNESS_CARD_TITLE))
                .with_child(Element::new("dl")),
        );
    }
    let card = sidebar
        .children
        .iter_mut()
        .filter_map(Node::as_element_mut)
        .find(|el| el.has_class(WITNESS_CARD_CLASS))?;
    if !card.child_elements().any(|el| el.tag == "dl") {
        card.push(Element::new("dl"));
    }
    card.find_mut(&|el| el.tag == "dl")
}
