//! In-memory [`SketchApi`] for exercising the state machines.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use sketchbook_core::ids::parse_id;
use sketchbook_core::lookup::LookupKind;
use sketchbook_core::types::DbId;

use crate::api::SketchApi;
use crate::error::ClientError;
use crate::models::{Lookup, LookupRef, LookupSet, NewSketch, Sketch, SketchFields, SketchQuery};

#[derive(Default)]
struct Data {
    next_id: DbId,
    lookups: LookupSet,
    sketches: Vec<Sketch>,
}

#[derive(Default)]
pub struct FakeApi {
    data: Mutex<Data>,
    failing: AtomicBool,
    calls: Mutex<Vec<&'static str>>,
}

fn unavailable() -> ClientError {
    ClientError::Api {
        status: 500,
        body: r#"{"error":"An internal error occurred","code":"INTERNAL_ERROR"}"#.into(),
    }
}

fn bad_request(message: &str) -> ClientError {
    ClientError::Api {
        status: 400,
        body: serde_json::json!({"error": message, "code": "VALIDATION_ERROR"}).to_string(),
    }
}

impl FakeApi {
    /// Make every following call fail until switched back.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn sketch_count(&self) -> usize {
        self.data.lock().unwrap().sketches.len()
    }

    /// Insert a lookup directly and return its id.
    pub fn seed_lookup(&self, kind: LookupKind, name: &str) -> DbId {
        let mut data = self.data.lock().unwrap();
        insert_lookup(&mut data, kind, name, None).id
    }

    fn enter(&self, call: &'static str) -> Result<(), ClientError> {
        self.calls.lock().unwrap().push(call);
        if self.failing.load(Ordering::SeqCst) {
            Err(unavailable())
        } else {
            Ok(())
        }
    }
}

fn insert_lookup(data: &mut Data, kind: LookupKind, name: &str, hex: Option<&str>) -> Lookup {
    data.next_id += 1;
    let lookup = Lookup {
        id: data.next_id,
        name: name.to_string(),
        hex: hex.map(String::from),
        created_at: Utc::now(),
    };
    let list = match kind {
        LookupKind::Category => &mut data.lookups.categories,
        LookupKind::Color => &mut data.lookups.colors,
        LookupKind::Style => &mut data.lookups.styles,
    };
    list.push(lookup.clone());
    lookup
}

fn expand(data: &Data, kind: LookupKind, value: &str) -> Option<LookupRef> {
    let id = parse_id(value)?;
    data.lookups
        .of(kind)
        .iter()
        .find(|l| l.id == id)
        .map(|l| LookupRef {
            id: l.id,
            name: l.name.clone(),
            hex: l.hex.clone(),
        })
}

fn matches(reference: Option<&LookupRef>, value: &str) -> bool {
    value.is_empty()
        || reference.is_some_and(|r| r.name == value || parse_id(value) == Some(r.id))
}

#[async_trait]
impl SketchApi for FakeApi {
    async fn list_lookups(&self) -> Result<LookupSet, ClientError> {
        self.enter("list_lookups")?;
        Ok(self.data.lock().unwrap().lookups.clone())
    }

    async fn create_lookup(
        &self,
        kind: LookupKind,
        name: &str,
        hex: Option<&str>,
    ) -> Result<Lookup, ClientError> {
        self.enter("create_lookup")?;
        let mut data = self.data.lock().unwrap();
        if data.lookups.of(kind).iter().any(|l| l.name == name) {
            return Err(bad_request(&format!("{} '{name}' already exists", kind.label())));
        }
        Ok(insert_lookup(&mut data, kind, name, hex))
    }

    async fn list_sketches(&self, query: &SketchQuery) -> Result<Vec<Sketch>, ClientError> {
        self.enter("list_sketches")?;
        let data = self.data.lock().unwrap();
        Ok(data
            .sketches
            .iter()
            .filter(|s| {
                matches(s.category_id.as_ref(), &query.category_id)
                    && matches(s.color_id.as_ref(), &query.color_id)
                    && matches(s.style_id.as_ref(), &query.style_id)
            })
            .cloned()
            .collect())
    }

    async fn create_sketch(&self, sketch: &NewSketch) -> Result<Sketch, ClientError> {
        self.enter("create_sketch")?;
        let mut data = self.data.lock().unwrap();
        let fields = &sketch.fields;
        let Some(category) = expand(&data, LookupKind::Category, &fields.category_id) else {
            return Err(bad_request("category_id is required"));
        };
        data.next_id += 1;
        let now = Utc::now();
        let created = Sketch {
            id: data.next_id,
            title: fields.title.clone(),
            category_id: Some(category),
            color_id: expand(&data, LookupKind::Color, &fields.color_id),
            style_id: expand(&data, LookupKind::Style, &fields.style_id),
            image: Some(sketch.image.clone()),
            created_at: now,
            updated_at: now,
        };
        data.sketches.insert(0, created.clone());
        Ok(created)
    }

    async fn update_sketch(&self, id: DbId, fields: &SketchFields) -> Result<Sketch, ClientError> {
        self.enter("update_sketch")?;
        let mut data = self.data.lock().unwrap();
        let category_id = expand(&data, LookupKind::Category, &fields.category_id);
        let color_id = expand(&data, LookupKind::Color, &fields.color_id);
        let style_id = expand(&data, LookupKind::Style, &fields.style_id);
        let Some(sketch) = data.sketches.iter_mut().find(|s| s.id == id) else {
            return Err(ClientError::Api {
                status: 404,
                body: format!(r#"{{"error":"Sketch with id {id} not found","code":"NOT_FOUND"}}"#),
            });
        };
        sketch.title = fields.title.clone();
        sketch.category_id = category_id;
        sketch.color_id = color_id;
        sketch.style_id = style_id;
        sketch.updated_at = Utc::now();
        Ok(sketch.clone())
    }

    async fn delete_sketch(&self, id: DbId) -> Result<(), ClientError> {
        self.enter("delete_sketch")?;
        self.data.lock().unwrap().sketches.retain(|s| s.id != id);
        Ok(())
    }
}
