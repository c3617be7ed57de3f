use std::sync::Mutex;

use tracing::info;

/// Localized texts shown to the admin.
pub mod messages {
    pub const SAVE_FAILED: &str = "حدث خطأ أثناء الحفظ";
    pub const UPLOAD_FAILED: &str = "حدث خطأ أثناء رفع الصورة. يرجى المحاولة مرة أخرى.";
    pub const SETTINGS_SAVED: &str = "تم حفظ الإعدادات بنجاح!";
    pub const CONFIRM_DELETE_CATEGORY: &str = "هل أنت متأكد من حذف هذا القسم؟";
    pub const CONFIRM_DELETE_ITEM: &str = "هل أنت متأكد من حذف هذا الصنف؟";
    pub const UNKNOWN_CATEGORY: &str = "غير محدد";
    pub const REQUIRED_FIELDS: &str = "يرجى ملء جميع الحقول المطلوبة";
    pub const LOGIN_REQUIRED: &str = "يجب تسجيل الدخول أولاً";
    pub const SAVING: &str = "جاري الحفظ...";
}

/// Asks the admin a yes/no question before a destructive action.
pub trait Confirm: Send + Sync {
    fn confirm(&self, message: &str) -> bool;
}

/// Shows a blocking message to the admin.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

/// Answers every question the same way.
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm(pub bool);

impl Confirm for AutoConfirm {
    fn confirm(&self, message: &str) -> bool {
        info!(message, answer = self.0, "Confirmation requested");
        self.0
    }
}

/// Writes messages to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str) {
        info!(message, "Admin notification");
    }
}

/// Keeps every message, for inspection by the caller.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().map(|m| m.clone()).unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message.to_string());
        }
    }
}
