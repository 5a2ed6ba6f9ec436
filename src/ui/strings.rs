//! Static Mongolian UI copy. The product ships with a single locale, so the
//! strings live here as plain constants rather than behind a translation
//! layer. Keeping them in one place makes the exact user-visible wording easy
//! to assert in tests.

/// Login dialog title.
pub(crate) const LOGIN_TITLE: &str = "Нэвтрэх";
/// Username field label.
pub(crate) const LOGIN_USERNAME: &str = "Нэвтрэх нэр";
/// Password field label.
pub(crate) const LOGIN_PASSWORD: &str = "Нууц үг";
/// Shown when the backend explicitly rejects the credentials.
pub(crate) const LOGIN_INVALID: &str = "Нэвтрэх нэр эсвэл нууц үг буруу";
/// Shown when the login call itself fails (backend unreachable or broken).
pub(crate) const LOGIN_FAILED: &str = "Нэвтрэхэд алдаа гарлаа";
/// Both fields are required before a request is attempted.
pub(crate) const LOGIN_REQUIRED: &str = "Нэвтрэх нэр болон нууц үгээ оруулна уу";
/// Hint while a login call is in flight.
pub(crate) const LOGIN_SUBMITTING: &str = "Нэвтэрч байна...";

/// Product title in the browse header.
pub(crate) const HEADER_TITLE: &str = "Контент";
/// Logout action label.
pub(crate) const LOGOUT: &str = "Гарах";

/// Search input placeholder.
pub(crate) const SEARCH_PLACEHOLDER: &str = "Тоглоомын нэрээр хайх...";
/// Search action label.
pub(crate) const SEARCH_ACTION: &str = "Хайх";
/// Loading indicator while a search is in flight.
pub(crate) const SEARCHING: &str = "Хайж байна...";
/// Grid title before any search has produced results.
pub(crate) const RESULTS_DEFAULT_TITLE: &str = "Тоглоомын бичлэгүүд";
/// Empty-state headline after a search came back with nothing.
pub(crate) const EMPTY_TITLE: &str = "Хайлтын үр дүн олдсонгүй";
/// Empty-state hint after a search came back with nothing.
pub(crate) const EMPTY_HINT: &str = "Өөр тоглоомын нэрээр хайлт хийж үзнэ үү";
/// Prompt shown before the first search of a session.
pub(crate) const EMPTY_PROMPT: &str = "Хайлт хийхийн тулд 'f' дарна уу";

/// Back control in the detail view.
pub(crate) const BACK: &str = "← Буцах";
/// Detail panel title around the media launcher.
pub(crate) const PLAYER_TITLE: &str = "Тоглуулагч";
/// Status text after handing the video to the system player.
pub(crate) const PLAYING: &str = "Тоглуулж байна";
/// Status text when the system player could not be launched.
pub(crate) const PLAYER_FAILED: &str = "Бичлэг нээхэд алдаа гарлаа";
/// View-count prefix in the detail view.
pub(crate) const VIEWS_PREFIX: &str = "Үзсэн";
/// Duration prefix in the detail view.
pub(crate) const DURATION_PREFIX: &str = "Үргэлжлэх хугацаа";
/// View-count suffix on result cards.
pub(crate) const VIEWS_SUFFIX: &str = "үзсэн";

/// Title line above the result grid. Counts the records of the current result
/// set; falls back to the generic heading while nothing has matched.
pub(crate) fn results_title(query: &str, result_count: usize) -> String {
    if result_count > 0 {
        format!("\"{query}\"-ийн хайлтын үр дүн ({result_count})")
    } else {
        RESULTS_DEFAULT_TITLE.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn results_title_counts_records_in_backend_order_language() {
        assert_eq!(
            results_title("mario", 3),
            "\"mario\"-ийн хайлтын үр дүн (3)"
        );
    }

    #[test]
    fn results_title_falls_back_to_generic_heading() {
        assert_eq!(results_title("zzz", 0), RESULTS_DEFAULT_TITLE);
        assert_eq!(results_title("", 0), RESULTS_DEFAULT_TITLE);
    }
}
