//! Canned replies. Guest-facing texts use legacy Telegram Markdown.

use crate::config::HostProfile;

pub const MSG_START_ADMIN: &str = "Привет! Я бот, который может отвечать на команду /start.";
pub const MSG_ADMIN_ONLY: &str = "Извините, но эта команда доступна только админу.";
pub const MSG_BAD_FORMAT: &str = "Неверный формат команды. Используйте /addlink месяц=ссылка";
pub const MSG_UNRECOGNIZED_MONTH: &str = "Не удалось распознать месяц.";
pub const MSG_READ_ERROR: &str = "Произошла ошибка при чтении файла.";
pub const MSG_WRITE_ERROR: &str = "Произошла ошибка при записи в файл.";
pub const MSG_RECORD_SAVED: &str = "Запись успешно обновлена или добавлена.";

pub const RECEIPT_URL_PREFIX: &str = "https://lknpd.nalog.ru";

const INSTRUCTION_HEADER: &str = "Доброе утро 😀 высылаю вам инструкцию к заселению\n——— ••• ———\n";

pub fn links_file_missing(file_name: &str) -> String {
    format!("Файл {file_name} не найден.")
}

pub fn links_dump(file_name: &str, content: &str) -> String {
    format!("Содержимое файла {file_name}:\n{content}")
}

/// Welcome message for a booking, followed by the check-in instruction block.
///
/// Without a link the instruction block keeps its header so the host can paste
/// the link by hand.
pub fn welcome(
    host: &HostProfile,
    start_day: &str,
    end_day: &str,
    month: &str,
    link: Option<&str>,
) -> String {
    let mut out = format!(
        "```\nЗдравствуйте 👋😃 вы забронировали квартиру в {city} с {start_day} по {end_day} {month}\n\n\
Меня зовут {name}) буду курировать вопросы вашего проживания.\n\
У нас бесконтактное заселение, за день до него пришлю вам всю информацию.\n\n\
Если есть вопросы пишите, если срочно звоните по номеру {phone}\n\n",
        city = host.city,
        name = host.name,
        phone = host.phone,
    );

    out.push_str(INSTRUCTION_HEADER);
    if let Some(link) = link {
        out.push_str(link);
        out.push('\n');
    }
    out.push_str("```");
    out
}

pub fn receipt_ack(receipt_url: &str) -> String {
    format!(
        "Получил, спасибо за своевременность.\nПрикреплю [здесь ваш чек]({receipt_url})\n———                                                 • • •"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn welcome_with_link_closes_code_block_after_link() {
        let text = welcome(&HostProfile::default(), "3", "5", "июля", Some("http://l"));
        assert!(text.starts_with("```\nЗдравствуйте 👋😃 вы забронировали квартиру в Казани с 3 по 5 июля\n"));
        assert!(text.contains("Меня зовут Руслан)"));
        assert!(text.contains("+7(904)661-09-49"));
        assert!(text.ends_with("——— ••• ———\nhttp://l\n```"));
    }

    #[test]
    fn welcome_without_link_keeps_instruction_header() {
        let text = welcome(&HostProfile::default(), "3", "5", "июля", None);
        assert!(text.ends_with("высылаю вам инструкцию к заселению\n——— ••• ———\n```"));
    }

    #[test]
    fn receipt_embeds_url_as_link() {
        let text = receipt_ack("https://lknpd.nalog.ru/abc");
        assert_eq!(
            text,
            "Получил, спасибо за своевременность.\nПрикреплю [здесь ваш чек](https://lknpd.nalog.ru/abc)\n———                                                 • • •"
        );
    }
}
