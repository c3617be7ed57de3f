use anyhow::Context;
use tracing::{error, info, Instrument};

use mehran_menu::admin::AdminError;
use mehran_menu::app_system::{setup_tracing, MenuSystem};
use mehran_menu::auth::hash_password;
use mehran_menu::cart::format_amount;
use mehran_menu::config::Settings;
use mehran_menu::domain::PriceOption;

const DEMO_EMAIL: &str = "admin@mehran.ps";
const DEMO_PASSWORD: &str = "mehran-demo";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_tracing("info");

    let mut config = Settings::load().context("loading configuration")?;
    let demo_account = config.auth.lacks_admin_account();
    if demo_account {
        info!("No admin account configured, using the demo account");
        config.auth.admin_email = DEMO_EMAIL.to_string();
        config.auth.admin_password_hash = hash_password(DEMO_PASSWORD)?;
    }

    info!("Starting menu system");
    let system = MenuSystem::start(config).await?;

    if demo_account {
        system
            .auth
            .login(DEMO_EMAIL, DEMO_PASSWORD)
            .await
            .map_err(|e| anyhow::anyhow!(e.user_message()))?;
        setup_menu(&system).instrument(tracing::info_span!("menu_setup")).await?;
    } else {
        info!("Admin account is configured externally, skipping the admin demo");
    }

    let Some(menu) = system
        .menu
        .wait_for(|m| !m.loading && (!demo_account || !m.menu_items.is_empty()))
        .await
    else {
        error!("Menu data stopped before loading");
        return Ok(());
    };

    let mut cart = system.open_cart();
    for section in menu.sections() {
        info!(category = %section.category.name_ar, items = section.items.len(), "Section");
        for item in section.items {
            if let Some(price) = item.prices.first() {
                cart.add_item(item, price, 2);
            }
        }
    }

    let currency = menu.settings.as_ref().map(|s| s.currency.as_str()).unwrap_or("₪");
    let summary = cart.summary(menu.service_charge());
    info!(
        items = cart.total_items(),
        subtotal = %format_amount(summary.subtotal, currency),
        service = %format_amount(summary.service_amount, currency),
        total = %format_amount(summary.total, currency),
        "Saved items"
    );
    cart.clear_all();

    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}

/// Creates a category, an item and the site settings through the admin panel.
async fn setup_menu(system: &MenuSystem) -> Result<(), AdminError> {
    let admin = &system.admin;
    let mut grills = admin.categories.new_form().await?;
    grills.name_ar = "مشاوي".to_string();
    grills.name_en = "Grills".to_string();
    let grills_id = admin.categories.submit(None, grills).await?;

    let mut kebab = admin.menu_items.new_form().await?;
    kebab.name_ar = "كباب".to_string();
    kebab.name_en = "Kebab".to_string();
    kebab.category_id = grills_id.clone();
    kebab.prices = vec![PriceOption::new("نصف", 25.0), PriceOption::new("كامل", 45.0)];
    admin.menu_items.submit(None, kebab).await?;

    let mut settings = admin.settings.load_form().await?;
    settings.phone = "+970 2 000 0000".to_string();
    admin.settings.save(&settings).await?;

    let stats = admin.dashboard().await?;
    info!(?stats, "Dashboard");
    Ok(())
}
