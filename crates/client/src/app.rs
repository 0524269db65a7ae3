//! Root composition of the form and the list.

use std::sync::Arc;

use crate::api::SketchApi;
use crate::error::ClientError;
use crate::form::SketchForm;
use crate::list::SketchList;
use crate::models::Sketch;

/// One form and one list sharing an API client. The two only interact
/// through the last saved sketch: each successful save refetches the list.
pub struct SketchApp {
    pub form: SketchForm,
    pub list: SketchList,
    last_saved: Option<Sketch>,
}

impl SketchApp {
    pub fn new(api: Arc<dyn SketchApi>) -> Self {
        Self {
            form: SketchForm::new(api.clone()),
            list: SketchList::new(api),
            last_saved: None,
        }
    }

    /// Initial load of both components.
    pub async fn start(&mut self) {
        self.form.load_lookups().await;
        self.list.load_lookups().await;
        self.list.refresh().await;
    }

    pub fn last_saved(&self) -> Option<&Sketch> {
        self.last_saved.as_ref()
    }

    /// Submit the form and refresh the list after a successful save.
    pub async fn submit(&mut self, image: String) -> Result<&Sketch, ClientError> {
        let saved = self.form.submit(image).await?;
        self.list.refresh().await;
        Ok(self.last_saved.insert(saved))
    }
}

#[cfg(test)]
mod tests {
    use sketchbook_core::lookup::LookupKind;

    use super::*;
    use crate::testing::FakeApi;

    #[tokio::test]
    async fn save_sets_last_saved_and_refreshes_list() {
        let api = Arc::new(FakeApi::default());
        let dress = api.seed_lookup(LookupKind::Category, "Dress");
        let mut app = SketchApp::new(api.clone());
        app.start().await;
        assert!(app.list.sketches().is_empty());
        assert_eq!(app.form.lookups().categories.len(), 1);

        app.form.draft_mut().title = "Gown".into();
        app.form.draft_mut().category_id = dress.to_string();
        let saved_id = app.submit("data:image/png;base64,AA==".into()).await.unwrap().id;

        assert_eq!(app.last_saved().map(|s| s.id), Some(saved_id));
        assert_eq!(app.list.sketches().len(), 1);
        assert_eq!(api.calls().last(), Some(&"list_sketches"));
    }

    #[tokio::test]
    async fn failed_save_leaves_list_alone() {
        let api = Arc::new(FakeApi::default());
        let mut app = SketchApp::new(api.clone());
        app.form.draft_mut().title = "Gown".into();
        app.form.draft_mut().category_id = "404".into();

        assert!(app.submit("data:image/png;base64,AA==".into()).await.is_err());
        assert!(app.last_saved().is_none());
        assert!(!api.calls().contains(&"list_sketches"));
    }
}
