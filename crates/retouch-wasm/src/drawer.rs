//! WASM bindings for the animation drawer.
//!
//! Searches are delegated to a JS callback `(query, offset) => SearchPage`.
//! The callback is passed per call rather than stored, so the host can swap
//! bots or caches freely.

use retouch_core::drawer::SearchPage;
use retouch_core::{Animation, AnimationDrawer, AnimationSearch, DrawerConfig, EditError};
use wasm_bindgen::prelude::*;

/// Adapts a JS function to [`AnimationSearch`].
struct CallbackSearch<'a> {
    callback: &'a js_sys::Function,
}

impl AnimationSearch for CallbackSearch<'_> {
    fn search(&mut self, query: &str, offset: &str) -> Result<SearchPage, EditError> {
        let result = self
            .callback
            .call2(
                &JsValue::NULL,
                &JsValue::from_str(query),
                &JsValue::from_str(offset),
            )
            .map_err(|e| {
                EditError::Search(e.as_string().unwrap_or_else(|| format!("{:?}", e)))
            })?;
        serde_wasm_bindgen::from_value(result).map_err(|e| EditError::Search(e.to_string()))
    }
}

/// Animation picker state for JavaScript.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const drawer = new JsAnimationDrawer(undefined);
/// const search = (query: string, offset: string) => cache.lookup(query, offset);
/// drawer.select(1, search); // trending
/// render(drawer.items());
/// ```
#[wasm_bindgen]
pub struct JsAnimationDrawer {
    inner: AnimationDrawer,
}

#[wasm_bindgen]
impl JsAnimationDrawer {
    /// Create a drawer. `config` is a serialized `DrawerConfig` or `undefined`.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<JsAnimationDrawer, JsValue> {
        let config: DrawerConfig = if config.is_undefined() || config.is_null() {
            DrawerConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Invalid drawer config: {}", e)))?
        };
        Ok(Self::from_config(&config))
    }

    /// Tab titles, in set order.
    pub fn titles(&self) -> js_sys::Array {
        self.title_list().into_iter().map(JsValue::from).collect()
    }

    #[wasm_bindgen(getter)]
    pub fn selected_index(&self) -> usize {
        self.inner.selected_index()
    }

    #[wasm_bindgen(getter)]
    pub fn is_searching(&self) -> bool {
        self.inner.is_searching()
    }

    #[wasm_bindgen(getter)]
    pub fn has_more(&self) -> bool {
        self.inner.items().has_more()
    }

    /// Re-render counter of the visible collection.
    #[wasm_bindgen(getter)]
    pub fn revision(&self) -> u64 {
        self.inner.items().revision()
    }

    /// Visible animations as a JS array.
    pub fn items(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.inner.items().items())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn key_from_index(&self, index: usize) -> Option<String> {
        self.inner.items().key_from_index(index)
    }

    pub fn index_from_key(&self, key: &str) -> Option<usize> {
        self.inner.items().index_from_key(key)
    }

    /// Replace the saved set with a serialized `Animation[]`.
    pub fn replace_saved(&mut self, items: JsValue) -> Result<(), JsValue> {
        let items: Vec<Animation> = serde_wasm_bindgen::from_value(items)
            .map_err(|e| JsValue::from_str(&format!("Invalid animations: {}", e)))?;
        self.inner.replace_saved(items);
        Ok(())
    }

    pub fn select(&mut self, index: usize, search: &js_sys::Function) -> bool {
        self.inner
            .select(index, &mut CallbackSearch { callback: search })
    }

    pub fn find(&mut self, query: &str, search: &js_sys::Function) -> bool {
        self.inner
            .find(query, &mut CallbackSearch { callback: search })
    }

    /// Fetch the next page of the visible collection; returns items added.
    pub fn load_more(&mut self, search: &js_sys::Function) -> usize {
        self.inner
            .load_more(&mut CallbackSearch { callback: search })
    }
}

impl JsAnimationDrawer {
    pub(crate) fn from_config(config: &DrawerConfig) -> Self {
        Self {
            inner: AnimationDrawer::new(config),
        }
    }

    fn title_list(&self) -> Vec<String> {
        self.inner
            .sets()
            .iter()
            .map(|set| set.title().to_string())
            .collect()
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn one_page_backend() -> js_sys::Function {
        js_sys::Function::new_with_args(
            "query, offset",
            "return { items: [{ id: 5, media: { handle: query, kind: 'Video' } }], next_offset: '' };",
        )
    }

    #[wasm_bindgen_test]
    fn test_find_uses_callback() {
        let mut drawer = JsAnimationDrawer::new(JsValue::UNDEFINED).unwrap();
        assert!(drawer.find("cats", &one_page_backend()));
        assert!(drawer.is_searching());
        assert_eq!(drawer.key_from_index(0).as_deref(), Some("5"));
        assert!(!drawer.has_more());
    }

    #[wasm_bindgen_test]
    fn test_throwing_callback_ends_paging() {
        let failing = js_sys::Function::new_with_args("query, offset", "throw 'offline';");
        let mut drawer = JsAnimationDrawer::new(JsValue::UNDEFINED).unwrap();
        assert!(drawer.select(1, &failing));
        assert!(!drawer.has_more());
        assert_eq!(drawer.load_more(&failing), 0);
    }
}
