#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use serde_json::{json, Value};

    use crate::admin::{messages, AdminContext, AdminError, AdminPanel, AutoConfirm, RecordingNotifier};
    use crate::app_system::{AdminPrompts, MenuSystem};
    use crate::auth::{AdminUser, AuthError, AuthSession, IdentityProvider};
    use crate::clients::{CategoryClient, MenuItemClient, SettingsClient, StatsClient};
    use crate::config::Settings;
    use crate::domain::{Category, PriceOption};
    use crate::image_host::{ImageFile, ImageHost, UploadError};
    use crate::menu_data::MenuData;
    use crate::mock_framework::{create_mock_store, expect_get, expect_push, expect_silence, expect_update};
    use crate::store::{MemoryStore, StoreClient, StoreError};

    /// Accepts any email with any password.
    struct AnyCredentials;

    #[async_trait]
    impl IdentityProvider for AnyCredentials {
        async fn sign_in(&self, email: &str, _password: &str) -> Result<AdminUser, AuthError> {
            Ok(AdminUser {
                uid: "uid-test".to_string(),
                email: email.to_string(),
            })
        }
    }

    struct FailingHost;

    #[async_trait]
    impl ImageHost for FailingHost {
        async fn upload(&self, _file: ImageFile) -> Result<String, UploadError> {
            Err(UploadError::Rejected("Upload preset not found".to_string()))
        }
    }

    struct FixedHost(&'static str);

    #[async_trait]
    impl ImageHost for FixedHost {
        async fn upload(&self, _file: ImageFile) -> Result<String, UploadError> {
            Ok(self.0.to_string())
        }
    }

    fn photo() -> ImageFile {
        ImageFile::new("dish.jpg", "image/jpeg", b"jpeg".to_vec())
    }

    async fn context(
        images: Arc<dyn ImageHost>,
        confirm: bool,
        signed_in: bool,
    ) -> (AdminContext, Arc<RecordingNotifier>) {
        let auth = AuthSession::new(Arc::new(AnyCredentials));
        auth.resolve(None);
        if signed_in {
            auth.login("admin@mehran.ps", "pw").await.unwrap();
        }
        let notifier = Arc::new(RecordingNotifier::new());
        let ctx = AdminContext::new(auth, images, notifier.clone(), Arc::new(AutoConfirm(confirm)));
        (ctx, notifier)
    }

    fn panel(store: StoreClient, ctx: AdminContext) -> AdminPanel {
        AdminPanel::new(
            CategoryClient::new(store.clone()),
            MenuItemClient::new(store.clone()),
            SettingsClient::new(store.clone()),
            StatsClient::new(store),
            ctx,
        )
    }

    #[tokio::test]
    async fn blank_arabic_name_is_rejected_before_any_write() {
        let (store, mut store_rx) = create_mock_store(10);
        let (ctx, notifier) = context(Arc::new(FixedHost("https://img/x.jpg")), true, true).await;
        let admin = panel(store, ctx);

        let mut form = admin.categories.edit_form(&Category::new("", "Grills", 0));
        form.name_ar = "  ".to_string();
        let result = admin.categories.submit(None, form).await;

        assert!(matches!(result, Err(AdminError::Validation(_))));
        expect_silence(&mut store_rx);
        assert!(notifier.messages().is_empty());
        assert!(!admin.categories.is_saving());
    }

    #[tokio::test]
    async fn new_category_is_pushed_at_the_end() {
        let (store, mut store_rx) = create_mock_store(10);
        let (ctx, _) = context(Arc::new(FixedHost("https://img/x.jpg")), true, true).await;
        let admin = panel(store, ctx);

        let task = tokio::spawn(async move {
            let mut form = admin.categories.edit_form(&Category::new("مقبلات", "Starters", 0));
            form.is_active = false;
            admin.categories.submit(None, form).await
        });

        // Count existing categories
        let (path, responder) = expect_get(&mut store_rx).await.expect("Expected Get request");
        assert_eq!(path.to_string(), "/categories");
        responder
            .send(Ok(json!({ "-a": { "nameAr": "أ" }, "-b": { "nameAr": "ب" } })))
            .unwrap();

        // Insert with every field explicit
        let (path, value, responder) = expect_push(&mut store_rx).await.expect("Expected Push request");
        assert_eq!(path.to_string(), "/categories");
        assert_eq!(
            value,
            json!({ "nameAr": "مقبلات", "nameEn": "Starters", "image": "", "isActive": false, "order": 2 })
        );
        responder.send(Ok("-new".to_string())).unwrap();

        assert_eq!(task.await.unwrap(), Ok("-new".to_string()));
    }

    #[tokio::test]
    async fn declined_delete_issues_no_remote_call() {
        let (store, mut store_rx) = create_mock_store(10);
        let (ctx, notifier) = context(Arc::new(FixedHost("u")), false, true).await;
        let admin = panel(store, ctx);

        assert_eq!(admin.categories.delete("-c").await, Ok(false));
        assert_eq!(admin.menu_items.delete("-m").await, Ok(false));

        expect_silence(&mut store_rx);
        assert!(notifier.messages().is_empty());
    }

    #[tokio::test]
    async fn signed_out_admin_is_refused() {
        let (store, mut store_rx) = create_mock_store(10);
        let (ctx, _) = context(Arc::new(FixedHost("u")), true, false).await;
        let admin = panel(store, ctx);

        let category = Category::new("مشاوي", "Grills", 0);
        assert_eq!(admin.categories.toggle_active(&category).await, Err(AdminError::Unauthenticated));
        assert_eq!(admin.categories.delete("-c").await, Err(AdminError::Unauthenticated));
        assert!(matches!(admin.dashboard().await, Err(AdminError::Unauthenticated)));
        assert_eq!(
            AdminError::Unauthenticated.user_message(),
            messages::LOGIN_REQUIRED
        );

        expect_silence(&mut store_rx);
    }

    #[tokio::test]
    async fn toggle_sends_only_the_flag() {
        let (store, mut store_rx) = create_mock_store(10);
        let (ctx, _) = context(Arc::new(FixedHost("u")), true, true).await;
        let admin = panel(store, ctx);

        let task = tokio::spawn(async move {
            let mut category = Category::new("مشاوي", "Grills", 0);
            category.id = "-g".to_string();
            admin.categories.toggle_active(&category).await
        });

        let (path, fields, responder) = expect_update(&mut store_rx).await.expect("Expected Update request");
        assert_eq!(path.to_string(), "/categories/-g");
        assert_eq!(fields.len(), 1);
        assert_eq!(fields["isActive"], json!(false));
        responder.send(Ok(())).unwrap();

        assert!(task.await.unwrap().is_ok());
    }

    #[tokio::test]
    async fn failed_write_alerts_the_admin() {
        let (store, mut store_rx) = create_mock_store(10);
        let (ctx, notifier) = context(Arc::new(FixedHost("u")), true, true).await;
        let admin = panel(store, ctx);

        let task = tokio::spawn(async move {
            let mut category = Category::new("مشاوي", "Grills", 0);
            category.id = "-g".to_string();
            let form = admin.categories.edit_form(&category);
            admin.categories.submit(Some("-g"), form).await
        });

        let (_, _, responder) = expect_update(&mut store_rx).await.expect("Expected Update request");
        responder
            .send(Err(StoreError::ActorCommunicationError("offline".to_string())))
            .unwrap();

        let err = task.await.unwrap().unwrap_err();
        assert_eq!(err.user_message(), messages::SAVE_FAILED);
        assert_eq!(notifier.messages(), vec![messages::SAVE_FAILED.to_string()]);
    }

    #[tokio::test]
    async fn failed_upload_stores_an_empty_image() {
        let (store_actor, store) = MemoryStore::new(16);
        tokio::spawn(store_actor.run());
        let (ctx, notifier) = context(Arc::new(FailingHost), true, true).await;
        let admin = panel(store.clone(), ctx);

        let mut form = admin.menu_items.new_form().await.unwrap();
        form.name_ar = "حمص".to_string();
        form.name_en = "Hummus".to_string();
        form.category_id = "-c".to_string();
        form.set_price_label(0, "صحن");
        form.set_price(0, 8.0);
        form.image = "stale".to_string();

        admin.menu_items.upload_image(&mut form, photo()).await.unwrap();
        assert_eq!(form.image, "");
        assert_eq!(notifier.messages(), vec![messages::UPLOAD_FAILED.to_string()]);

        let id = admin.menu_items.submit(None, form).await.unwrap();
        let stored = store.get(&format!("menuItems/{id}")).await.unwrap();
        assert_eq!(stored["image"], json!(""));
        assert_eq!(stored["description"], json!(""));
        assert_eq!(stored["order"], json!(0));
    }

    #[tokio::test]
    async fn admin_changes_reach_the_public_menu() {
        let (store_actor, store) = MemoryStore::new(32);
        tokio::spawn(store_actor.run());
        let (ctx, notifier) = context(Arc::new(FixedHost("https://img/grill.jpg")), true, true).await;
        let admin = panel(store.clone(), ctx);
        let menu = MenuData::start(
            &CategoryClient::new(store.clone()),
            &MenuItemClient::new(store.clone()),
            &SettingsClient::new(store.clone()),
        )
        .await
        .unwrap();

        // Two categories, the first hidden afterwards
        let mut salads = admin.categories.new_form().await.unwrap();
        salads.name_ar = "سلطات".to_string();
        salads.name_en = "Salads".to_string();
        let salads_id = admin.categories.submit(None, salads).await.unwrap();

        let mut grills = admin.categories.new_form().await.unwrap();
        grills.name_ar = "مشاوي".to_string();
        grills.name_en = "Grills".to_string();
        admin.categories.upload_image(&mut grills, photo()).await.unwrap();
        let grills_id = admin.categories.submit(None, grills).await.unwrap();

        for (name, price) in [("شيش طاووق", 30.0), ("كفتة", 28.0)] {
            let mut item = admin.menu_items.new_form().await.unwrap();
            item.name_ar = name.to_string();
            item.name_en = name.to_string();
            item.category_id = grills_id.clone();
            item.set_price_label(0, "صحن");
            item.set_price(0, price);
            admin.menu_items.submit(None, item).await.unwrap();
        }

        let categories = admin.categories.list().await.unwrap();
        let salads = categories.iter().find(|c| c.id == salads_id).unwrap();
        admin.categories.toggle_active(salads).await.unwrap();

        let mut settings = admin.settings.load_form().await.unwrap();
        settings.service_charge = 15.0;
        admin.settings.save(&settings).await.unwrap();
        assert_eq!(notifier.messages(), vec![messages::SETTINGS_SAVED.to_string()]);

        let snapshot = menu
            .wait_for(|m| {
                !m.loading
                    && m.menu_items.len() == 2
                    && m.categories.iter().any(|c| c.id == salads_id && !c.is_active)
            })
            .await
            .unwrap();

        let visible: Vec<&str> = snapshot.active_categories().iter().map(|c| c.name_en.as_str()).collect();
        assert_eq!(visible, vec!["Grills"]);
        assert_eq!(snapshot.default_category().unwrap().image.as_deref(), Some("https://img/grill.jpg"));
        let names: Vec<&str> = snapshot.items_in(&grills_id).iter().map(|i| i.name_ar.as_str()).collect();
        assert_eq!(names, vec!["شيش طاووق", "كفتة"]);
        assert_eq!(snapshot.service_charge(), 15.0);

        store.set("stats", json!({ "views": 7 })).await.unwrap();
        let stats = admin.dashboard().await.unwrap();
        assert_eq!(stats.total_items, 2);
        assert_eq!(stats.total_categories, 2);
        assert_eq!(stats.available_items, 2);
        assert_eq!(stats.views, 7);

        let items = admin.menu_items.list_all().await.unwrap();
        admin.menu_items.toggle_available(&items[0]).await.unwrap();
        assert_eq!(admin.dashboard().await.unwrap().available_items, 1);

        menu.shutdown().await;
    }

    #[tokio::test]
    async fn system_boots_from_a_seed_and_shuts_down() {
        let dir = tempfile::tempdir().unwrap();
        let seed = dir.path().join("seed.json");
        std::fs::write(
            &seed,
            json!({
                "categories": { "-c": { "nameAr": "مقبلات", "nameEn": "Starters", "order": 0, "isActive": true } },
                "menuItems": {
                    "-m": {
                        "nameAr": "متبل", "nameEn": "Mutabal", "categoryId": "-c", "isAvailable": true,
                        "order": 0, "prices": [{ "label": "صحن", "price": 9 }]
                    }
                },
                "settings": { "currency": "$" }
            })
            .to_string(),
        )
        .unwrap();

        let mut config = Settings::default();
        config.store.seed_path = Some(seed);
        config.cart.storage_dir = dir.path().join("cart");

        let system = MenuSystem::start_with(
            config,
            Arc::new(AnyCredentials),
            Arc::new(FixedHost("u")),
            AdminPrompts::default(),
        )
        .await
        .unwrap();

        let menu = system.menu.wait_loaded().await.unwrap();
        assert_eq!(menu.sections().len(), 1);
        assert_eq!(menu.settings.as_ref().unwrap().currency, "$");
        assert_eq!(menu.service_charge(), 10.0);

        let mut cart = system.open_cart();
        let item = menu.find_item("-m").unwrap();
        cart.add_item(item, &PriceOption::new("صحن", 9.0), 2);
        assert!((cart.summary(menu.service_charge()).total - 19.8).abs() < 1e-9);
        assert_eq!(system.open_cart().total_items(), 2);

        let stored: Value = system.store.get("menuItems/-m/nameEn").await.unwrap();
        assert_eq!(stored, json!("Mutabal"));

        system.shutdown().await.unwrap();
    }
}
