//! In-memory mounting collaborator.
//!
//! Keeps a small element tree (hosts, mounted template instances, slots and
//! form fields) so views can run without a real page. Used by the CLI and by
//! tests to inspect what the board rendered.

use crate::view::{
    Document, InsertPosition, MountError, MountRequest, APP_HOST, PROJECT_INPUT_TEMPLATE,
    PROJECT_ITEM_TEMPLATE, PROJECT_LIST_TEMPLATE,
};
use log::warn;
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;

/// Slot and field layout of one template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSpec {
    pub slots: Vec<String>,
    pub fields: Vec<String>,
}

impl TemplateSpec {
    pub fn new(slots: &[&str], fields: &[&str]) -> Self {
        Self {
            slots: slots.iter().map(|slot| slot.to_string()).collect(),
            fields: fields.iter().map(|field| field.to_string()).collect(),
        }
    }
}

#[derive(Debug, Default)]
struct SlotState {
    id: Option<String>,
    text: String,
    classes: BTreeSet<String>,
}

#[derive(Debug)]
struct MemoryElement {
    template_id: String,
    slot_order: Vec<String>,
    slots: BTreeMap<String, SlotState>,
    fields: BTreeMap<String, String>,
}

#[derive(Debug, Default)]
struct DocumentState {
    templates: BTreeMap<String, TemplateSpec>,
    hosts: BTreeMap<String, Vec<String>>,
    elements: BTreeMap<String, MemoryElement>,
    alerts: Vec<String>,
    next_element: u64,
}

/// Element tree held entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryDocument {
    state: RefCell<DocumentState>,
}

impl MemoryDocument {
    /// Creates an empty document with no templates and no hosts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a document holding the board templates and the `app` host.
    pub fn with_board_templates() -> Self {
        let document = Self::new();
        document.register_template(
            PROJECT_INPUT_TEMPLATE,
            TemplateSpec::new(&[], &["title", "description", "effort"]),
        );
        document.register_template(PROJECT_LIST_TEMPLATE, TemplateSpec::new(&["h2", "ul"], &[]));
        document.register_template(
            PROJECT_ITEM_TEMPLATE,
            TemplateSpec::new(&["h2", "h3", "p"], &[]),
        );
        document.add_host(APP_HOST);
        document
    }

    pub fn register_template(&self, template_id: &str, spec: TemplateSpec) {
        self.state
            .borrow_mut()
            .templates
            .insert(template_id.to_string(), spec);
    }

    /// Adds a root host elements can be mounted into.
    pub fn add_host(&self, host_id: &str) {
        self.state
            .borrow_mut()
            .hosts
            .entry(host_id.to_string())
            .or_default();
    }

    /// Ids of elements attached to `host_id`, in document order.
    pub fn children(&self, host_id: &str) -> Vec<String> {
        self.state
            .borrow()
            .hosts
            .get(host_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn contains(&self, element_id: &str) -> bool {
        self.state.borrow().elements.contains_key(element_id)
    }

    pub fn slot_text(&self, element_id: &str, slot: &str) -> Option<String> {
        let state = self.state.borrow();
        let slot = state.elements.get(element_id)?.slots.get(slot)?;
        Some(slot.text.clone())
    }

    pub fn slot_has_class(&self, element_id: &str, slot: &str, class: &str) -> bool {
        let state = self.state.borrow();
        state
            .elements
            .get(element_id)
            .and_then(|element| element.slots.get(slot))
            .is_some_and(|slot| slot.classes.contains(class))
    }

    /// Alerts raised so far, oldest first.
    pub fn alerts(&self) -> Vec<String> {
        self.state.borrow().alerts.clone()
    }

    /// Renders the tree under `host_id` as an indented outline.
    pub fn render_text(&self, host_id: &str) -> String {
        let state = self.state.borrow();
        let mut out = String::new();
        render_host(&state, host_id, 0, &mut out);
        out
    }
}

impl Document for MemoryDocument {
    fn mount(&self, request: &MountRequest<'_>) -> Result<String, MountError> {
        let mut state = self.state.borrow_mut();
        let spec = state
            .templates
            .get(request.template_id)
            .cloned()
            .ok_or_else(|| MountError::UnknownTemplate(request.template_id.to_string()))?;
        if !state.hosts.contains_key(request.host_id) {
            return Err(MountError::UnknownHost(request.host_id.to_string()));
        }

        let element_id = match request.element_id {
            Some(id) => id.to_string(),
            None => {
                state.next_element += 1;
                format!("{}-{}", request.template_id, state.next_element)
            }
        };
        if state.hosts.contains_key(&element_id) {
            return Err(MountError::DuplicateElementId(element_id));
        }
        // Reusing an id moves the element: the stale copy leaves its old host.
        if state.elements.contains_key(&element_id) {
            detach(&mut state, &element_id);
        }

        let element = MemoryElement {
            template_id: request.template_id.to_string(),
            slot_order: spec.slots.clone(),
            slots: spec
                .slots
                .iter()
                .map(|slot| (slot.clone(), SlotState::default()))
                .collect(),
            fields: spec
                .fields
                .iter()
                .map(|field| (field.clone(), String::new()))
                .collect(),
        };
        state.elements.insert(element_id.clone(), element);

        let children = state.hosts.entry(request.host_id.to_string()).or_default();
        match request.position {
            InsertPosition::Start => children.insert(0, element_id.clone()),
            InsertPosition::End => children.push(element_id.clone()),
        }
        Ok(element_id)
    }

    fn set_slot_text(&self, element_id: &str, slot: &str, text: &str) -> Result<(), MountError> {
        let mut state = self.state.borrow_mut();
        slot_mut(&mut state, element_id, slot)?.text = text.to_string();
        Ok(())
    }

    fn set_slot_id(&self, element_id: &str, slot: &str, slot_id: &str) -> Result<(), MountError> {
        let mut state = self.state.borrow_mut();
        let previous = slot_mut(&mut state, element_id, slot)?
            .id
            .replace(slot_id.to_string());
        let moved_children = previous
            .and_then(|old| state.hosts.remove(&old))
            .unwrap_or_default();
        state
            .hosts
            .entry(slot_id.to_string())
            .or_default()
            .extend(moved_children);
        Ok(())
    }

    fn add_slot_class(&self, element_id: &str, slot: &str, class: &str) -> Result<(), MountError> {
        let mut state = self.state.borrow_mut();
        slot_mut(&mut state, element_id, slot)?
            .classes
            .insert(class.to_string());
        Ok(())
    }

    fn remove_slot_class(
        &self,
        element_id: &str,
        slot: &str,
        class: &str,
    ) -> Result<(), MountError> {
        let mut state = self.state.borrow_mut();
        slot_mut(&mut state, element_id, slot)?.classes.remove(class);
        Ok(())
    }

    fn field_value(&self, element_id: &str, field: &str) -> Result<String, MountError> {
        let state = self.state.borrow();
        let element = state
            .elements
            .get(element_id)
            .ok_or_else(|| MountError::UnknownElement(element_id.to_string()))?;
        element
            .fields
            .get(field)
            .cloned()
            .ok_or_else(|| MountError::UnknownField {
                element_id: element_id.to_string(),
                field: field.to_string(),
            })
    }

    fn set_field_value(&self, element_id: &str, field: &str, value: &str) -> Result<(), MountError> {
        let mut state = self.state.borrow_mut();
        let element = state
            .elements
            .get_mut(element_id)
            .ok_or_else(|| MountError::UnknownElement(element_id.to_string()))?;
        let entry = element
            .fields
            .get_mut(field)
            .ok_or_else(|| MountError::UnknownField {
                element_id: element_id.to_string(),
                field: field.to_string(),
            })?;
        *entry = value.to_string();
        Ok(())
    }

    fn clear_children(&self, host_id: &str) -> Result<(), MountError> {
        let mut state = self.state.borrow_mut();
        let children = state
            .hosts
            .get_mut(host_id)
            .map(std::mem::take)
            .ok_or_else(|| MountError::UnknownHost(host_id.to_string()))?;
        for child in children {
            unmount(&mut state, &child);
        }
        Ok(())
    }

    fn alert(&self, message: &str) {
        warn!("event=user_alert module=view status=shown");
        self.state.borrow_mut().alerts.push(message.to_string());
    }
}

fn slot_mut<'a>(
    state: &'a mut DocumentState,
    element_id: &str,
    slot: &str,
) -> Result<&'a mut SlotState, MountError> {
    state
        .elements
        .get_mut(element_id)
        .ok_or_else(|| MountError::UnknownElement(element_id.to_string()))?
        .slots
        .get_mut(slot)
        .ok_or_else(|| MountError::UnknownSlot {
            element_id: element_id.to_string(),
            slot: slot.to_string(),
        })
}

fn detach(state: &mut DocumentState, element_id: &str) {
    for children in state.hosts.values_mut() {
        children.retain(|child| child != element_id);
    }
    unmount(state, element_id);
}

fn unmount(state: &mut DocumentState, element_id: &str) {
    let Some(element) = state.elements.remove(element_id) else {
        return;
    };
    for slot in element.slots.into_values() {
        let Some(slot_id) = slot.id else {
            continue;
        };
        for child in state.hosts.remove(&slot_id).unwrap_or_default() {
            unmount(state, &child);
        }
    }
}

fn render_host(state: &DocumentState, host_id: &str, depth: usize, out: &mut String) {
    let Some(children) = state.hosts.get(host_id) else {
        return;
    };
    for child in children {
        let Some(element) = state.elements.get(child) else {
            continue;
        };
        let indent = "  ".repeat(depth);
        let _ = writeln!(out, "{indent}[{child}] {}", element.template_id);
        for name in &element.slot_order {
            let Some(slot) = element.slots.get(name) else {
                continue;
            };
            if !slot.text.is_empty() {
                let _ = writeln!(out, "{indent}  {name}: {}", slot.text);
            }
            if let Some(slot_id) = &slot.id {
                let classes = slot.classes.iter().cloned().collect::<Vec<_>>().join(" ");
                if classes.is_empty() {
                    let _ = writeln!(out, "{indent}  {name}#{slot_id}");
                } else {
                    let _ = writeln!(out, "{indent}  {name}#{slot_id} ({classes})");
                }
                render_host(state, slot_id, depth + 2, out);
            }
        }
    }
}
