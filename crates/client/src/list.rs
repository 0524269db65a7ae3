//! Sketch list state: filter values, loaded sketches, and an optional
//! in-place edit.

use std::sync::Arc;

use sketchbook_core::lookup::LookupKind;
use sketchbook_core::types::DbId;

use crate::api::SketchApi;
use crate::error::ClientError;
use crate::models::{LookupSet, Sketch, SketchFields, SketchQuery};

/// Filter dropdown options, derived from the loaded sketches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub categories: Vec<String>,
    pub colors: Vec<String>,
    pub styles: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    pub id: DbId,
    pub draft: SketchFields,
}

pub struct SketchList {
    api: Arc<dyn SketchApi>,
    filters: SketchQuery,
    sketches: Vec<Sketch>,
    lookups: LookupSet,
    editing: Option<EditSession>,
}

impl SketchList {
    pub fn new(api: Arc<dyn SketchApi>) -> Self {
        Self {
            api,
            filters: SketchQuery::default(),
            sketches: Vec::new(),
            lookups: LookupSet::default(),
            editing: None,
        }
    }

    pub fn sketches(&self) -> &[Sketch] {
        &self.sketches
    }

    pub fn filters(&self) -> &SketchQuery {
        &self.filters
    }

    /// Full lookup lists for the edit dropdowns.
    pub fn lookups(&self) -> &LookupSet {
        &self.lookups
    }

    pub fn editing(&self) -> Option<&EditSession> {
        self.editing.as_ref()
    }

    pub fn edit_draft_mut(&mut self) -> Option<&mut SketchFields> {
        self.editing.as_mut().map(|session| &mut session.draft)
    }

    pub async fn load_lookups(&mut self) {
        match self.api.list_lookups().await {
            Ok(lookups) => self.lookups = lookups,
            Err(err) => tracing::error!(error = %err, "Failed to load lookups"),
        }
    }

    /// Fetch sketches matching the current filters.
    ///
    /// A failed fetch empties the list.
    pub async fn refresh(&mut self) {
        match self.api.list_sketches(&self.filters).await {
            Ok(sketches) => self.sketches = sketches,
            Err(err) => {
                tracing::error!(error = %err, "Failed to load sketches");
                self.sketches.clear();
            }
        }
    }

    /// Distinct reference names among the loaded sketches, in first-seen
    /// order.
    pub fn filter_options(&self) -> FilterOptions {
        let names = |kind: LookupKind| {
            let mut seen: Vec<String> = Vec::new();
            for reference in self.sketches.iter().filter_map(|s| s.reference(kind)) {
                if !seen.iter().any(|name| *name == reference.name) {
                    seen.push(reference.name.clone());
                }
            }
            seen
        };
        FilterOptions {
            categories: names(LookupKind::Category),
            colors: names(LookupKind::Color),
            styles: names(LookupKind::Style),
        }
    }

    /// Set one filter value. Takes effect on the next [`refresh`](Self::refresh).
    pub fn set_filter(&mut self, kind: LookupKind, value: impl Into<String>) {
        *self.filters.value_mut(kind) = value.into();
    }

    pub async fn reset_filters(&mut self) {
        self.filters = SketchQuery::default();
        self.refresh().await;
    }

    /// Begin editing a loaded sketch. Returns `false` if it is not loaded.
    pub fn start_edit(&mut self, id: DbId) -> bool {
        let Some(sketch) = self.sketches.iter().find(|s| s.id == id) else {
            return false;
        };
        self.editing = Some(EditSession {
            id,
            draft: SketchFields::from_sketch(sketch),
        });
        true
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Send the edit draft, swap in the updated sketch and refetch.
    ///
    /// On failure the edit stays open.
    pub async fn save_edit(&mut self) -> Result<(), ClientError> {
        let Some(session) = &self.editing else {
            return Ok(());
        };

        let updated = self
            .api
            .update_sketch(session.id, &session.draft)
            .await
            .inspect_err(|err| {
                tracing::error!(error = %err, sketch_id = session.id, "Failed to update sketch")
            })?;
        tracing::info!(sketch_id = updated.id, "Sketch updated");

        if let Some(slot) = self.sketches.iter_mut().find(|s| s.id == updated.id) {
            *slot = updated;
        }
        self.cancel_edit();
        self.refresh().await;
        Ok(())
    }

    /// Delete a sketch, drop it locally and refetch.
    pub async fn delete(&mut self, id: DbId) -> Result<(), ClientError> {
        self.api
            .delete_sketch(id)
            .await
            .inspect_err(|err| tracing::error!(error = %err, sketch_id = id, "Failed to delete sketch"))?;
        tracing::info!(sketch_id = id, "Sketch deleted");

        self.sketches.retain(|s| s.id != id);
        if self.editing.as_ref().is_some_and(|session| session.id == id) {
            self.cancel_edit();
        }
        self.refresh().await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewSketch;
    use crate::testing::FakeApi;

    struct Seeded {
        api: Arc<FakeApi>,
        dress: DbId,
        skirt: DbId,
        red: DbId,
    }

    async fn seeded() -> Seeded {
        let api = Arc::new(FakeApi::default());
        let dress = api.seed_lookup(LookupKind::Category, "Dress");
        let skirt = api.seed_lookup(LookupKind::Category, "Skirt");
        let red = api.seed_lookup(LookupKind::Color, "Red");
        api.seed_lookup(LookupKind::Color, "Unused");

        for (title, category, color) in [
            ("A", dress, Some(red)),
            ("B", skirt, None),
            ("C", dress, Some(red)),
        ] {
            let body = NewSketch {
                fields: SketchFields {
                    title: title.into(),
                    category_id: category.to_string(),
                    color_id: color.map(|c| c.to_string()).unwrap_or_default(),
                    style_id: String::new(),
                },
                image: "data:image/png;base64,AA==".into(),
            };
            api.create_sketch(&body).await.unwrap();
        }

        Seeded {
            api,
            dress,
            skirt,
            red,
        }
    }

    fn titles(list: &SketchList) -> Vec<&str> {
        list.sketches().iter().map(|s| s.title.as_str()).collect()
    }

    #[tokio::test]
    async fn filter_options_come_from_loaded_sketches_only() {
        let s = seeded().await;
        let mut list = SketchList::new(s.api.clone());
        list.refresh().await;

        let options = list.filter_options();
        assert_eq!(options.categories, ["Dress", "Skirt"]);
        assert_eq!(options.colors, ["Red"]);
        assert!(options.styles.is_empty());
    }

    #[tokio::test]
    async fn name_and_id_filters_agree() {
        let s = seeded().await;
        let mut list = SketchList::new(s.api.clone());

        list.set_filter(LookupKind::Category, "Dress");
        list.refresh().await;
        let by_name = list.sketches().to_vec();

        list.set_filter(LookupKind::Category, s.dress.to_string());
        list.refresh().await;
        assert_eq!(list.sketches(), by_name.as_slice());
        assert_eq!(titles(&list), ["C", "A"]);

        list.reset_filters().await;
        assert_eq!(list.filters(), &SketchQuery::default());
        assert_eq!(list.sketches().len(), 3);
    }

    #[tokio::test]
    async fn failed_refresh_clears_sketches() {
        let s = seeded().await;
        let mut list = SketchList::new(s.api.clone());
        list.refresh().await;
        assert_eq!(list.sketches().len(), 3);

        s.api.set_failing(true);
        list.refresh().await;
        assert!(list.sketches().is_empty());
    }

    #[tokio::test]
    async fn start_edit_copies_reference_ids() {
        let s = seeded().await;
        let mut list = SketchList::new(s.api.clone());
        list.refresh().await;
        let id = list.sketches()[0].id;

        assert!(list.start_edit(id));
        let draft = &list.editing().unwrap().draft;
        assert_eq!(draft.title, "C");
        assert_eq!(draft.category_id, s.dress.to_string());
        assert_eq!(draft.color_id, s.red.to_string());
        assert_eq!(draft.style_id, "");

        list.cancel_edit();
        assert!(list.editing().is_none());
        assert!(!list.start_edit(9999));
    }

    #[tokio::test]
    async fn save_edit_replaces_item_and_refetches() {
        let s = seeded().await;
        let mut list = SketchList::new(s.api.clone());
        list.refresh().await;
        let id = list.sketches()[0].id;

        list.start_edit(id);
        let draft = list.edit_draft_mut().unwrap();
        draft.title = "C2".into();
        draft.category_id = s.skirt.to_string();
        list.save_edit().await.unwrap();

        assert!(list.editing().is_none());
        let edited = list.sketches().iter().find(|s| s.id == id).unwrap();
        assert_eq!(edited.title, "C2");
        assert_eq!(edited.category_id.as_ref().unwrap().name, "Skirt");
        assert_eq!(s.api.calls().last(), Some(&"list_sketches"));
    }

    #[tokio::test]
    async fn failed_save_keeps_edit_open() {
        let s = seeded().await;
        let mut list = SketchList::new(s.api.clone());
        list.refresh().await;
        let id = list.sketches()[0].id;
        list.start_edit(id);
        list.edit_draft_mut().unwrap().title = "Lost".into();

        s.api.set_failing(true);
        assert!(list.save_edit().await.is_err());
        assert_eq!(list.editing().unwrap().draft.title, "Lost");
        assert_eq!(list.sketches()[0].title, "C");
    }

    #[tokio::test]
    async fn delete_removes_and_refetches() {
        let s = seeded().await;
        let mut list = SketchList::new(s.api.clone());
        list.refresh().await;
        let id = list.sketches()[1].id;

        list.delete(id).await.unwrap();

        assert_eq!(titles(&list), ["C", "A"]);
        assert_eq!(s.api.sketch_count(), 2);
    }

    #[tokio::test]
    async fn failed_delete_keeps_list() {
        let s = seeded().await;
        let mut list = SketchList::new(s.api.clone());
        list.refresh().await;
        let id = list.sketches()[0].id;

        s.api.set_failing(true);
        assert!(list.delete(id).await.is_err());
        assert_eq!(list.sketches().len(), 3);
    }
}
