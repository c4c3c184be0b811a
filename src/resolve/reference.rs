use futures::{StreamExt, TryStreamExt, stream};
use serde_json::Value;

use crate::errors::FetchError;
use crate::http::DocumentSource;

/// Where a reference identifier lives inside an item
#[derive(Debug, Clone, PartialEq)]
enum ReferencePath {
    /// `item[field]`
    Field(String),
    /// `item[array][*][field]`, optionally only where `element[guard.0] == guard.1`
    ArrayField {
        array: String,
        field: String,
        guard: Option<(String, Value)>,
    },
}

/// One reference field and the collection its identifiers point into
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceSpec {
    path: ReferencePath,
    collection: String,
}

impl ReferenceSpec {
    pub fn field(field: impl Into<String>, collection: impl Into<String>) -> Self {
        Self {
            path: ReferencePath::Field(field.into()),
            collection: collection.into(),
        }
    }

    pub fn array_field(
        array: impl Into<String>,
        field: impl Into<String>,
        collection: impl Into<String>,
    ) -> Self {
        Self {
            path: ReferencePath::ArrayField {
                array: array.into(),
                field: field.into(),
                guard: None,
            },
            collection: collection.into(),
        }
    }

    /// Restrict an array reference to elements whose `key` equals `value`.
    /// No effect on plain field references.
    pub fn when(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        if let ReferencePath::ArrayField { guard, .. } = &mut self.path {
            *guard = Some((key.into(), value.into()));
        }
        self
    }

    fn collect_slots<'a>(&'a self, item_index: usize, item: &Value, slots: &mut Vec<Slot<'a>>) {
        match &self.path {
            ReferencePath::Field(field) => {
                if let Some(id) = item.get(field).and_then(bare_identifier) {
                    slots.push(Slot {
                        item: item_index,
                        location: Location::Field(field.as_str()),
                        collection: self.collection.as_str(),
                        id,
                    });
                }
            }
            ReferencePath::ArrayField { array, field, guard } => {
                let Some(elements) = item.get(array).and_then(Value::as_array) else {
                    return;
                };

                for (element_index, element) in elements.iter().enumerate() {
                    if !passes_guard(element, guard.as_ref()) {
                        continue;
                    }
                    if let Some(id) = element.get(field).and_then(bare_identifier) {
                        slots.push(Slot {
                            item: item_index,
                            location: Location::ArrayField {
                                array: array.as_str(),
                                element: element_index,
                                field: field.as_str(),
                            },
                            collection: self.collection.as_str(),
                            id,
                        });
                    }
                }
            }
        }
    }
}

#[derive(Debug)]
enum Location<'a> {
    Field(&'a str),
    ArrayField {
        array: &'a str,
        element: usize,
        field: &'a str,
    },
}

/// A reference waiting to be replaced by its document
#[derive(Debug)]
struct Slot<'a> {
    item: usize,
    location: Location<'a>,
    collection: &'a str,
    id: String,
}

impl Slot<'_> {
    fn fill(&self, items: &mut [Value], document: Value) {
        let Some(item) = items.get_mut(self.item) else {
            return;
        };

        let target = match self.location {
            Location::Field(field) => item.get_mut(field),
            Location::ArrayField { array, element, field } => item
                .get_mut(array)
                .and_then(|a| a.get_mut(element))
                .and_then(|e| e.get_mut(field)),
        };

        if let Some(target) = target {
            *target = document;
        }
    }
}

/// Replaces bare identifiers in items with the documents they point to
#[derive(Debug, Clone, Default)]
pub struct ReferenceResolver {
    specs: Vec<ReferenceSpec>,
}

impl ReferenceResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, spec: ReferenceSpec) -> Self {
        self.specs.push(spec);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Resolve every pending reference of `items` with at most `max_in_flight`
    /// concurrent requests. Stops at the first failure, leaving `items` untouched.
    /// Returns the number of references replaced.
    pub async fn resolve_page<S: DocumentSource>(
        &self,
        source: &S,
        items: &mut [Value],
        max_in_flight: usize,
    ) -> Result<usize, FetchError> {
        let slots = self.pending_slots(items);
        if slots.is_empty() {
            return Ok(0);
        }

        let documents: Vec<(usize, Value)> = stream::iter(slots.iter().enumerate())
            .map(|(index, slot)| async move {
                let document = source.get_document(slot.collection, &slot.id).await?;
                Ok::<_, FetchError>((index, document))
            })
            .buffer_unordered(max_in_flight.max(1))
            .try_collect()
            .await?;

        for (index, document) in documents {
            slots[index].fill(items, document);
        }

        Ok(slots.len())
    }

    fn pending_slots(&self, items: &[Value]) -> Vec<Slot<'_>> {
        let mut slots = Vec::new();
        for (item_index, item) in items.iter().enumerate() {
            for spec in &self.specs {
                spec.collect_slots(item_index, item, &mut slots);
            }
        }
        slots
    }
}

/// Strings and numbers are identifiers; objects are already resolved, null means unset
fn bare_identifier(value: &Value) -> Option<String> {
    match value {
        Value::String(id) if !id.is_empty() => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

fn passes_guard(element: &Value, guard: Option<&(String, Value)>) -> bool {
    match guard {
        Some((key, expected)) => element.get(key) == Some(expected),
        None => true,
    }
}
