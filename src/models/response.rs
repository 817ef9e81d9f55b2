use derive_builder::Builder;

/// Режим разметки текста сообщения
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseMode {
    Html,
}

/// Кнопка под сообщением: подпись и данные обратного вызова
/// вида `<команда сервиса> <подкоманда> [аргументы...]`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InlineAction {
    pub label: String,
    pub payload: String,
}

impl InlineAction {
    pub fn new(label: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            payload: payload.into(),
        }
    }
}

/// Сетка кнопок, по строкам
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Keyboard {
    pub rows: Vec<Vec<InlineAction>>,
}

impl Keyboard {
    pub fn new(rows: Vec<Vec<InlineAction>>) -> Self {
        Self { rows }
    }
    pub fn button_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }
    pub fn labels(&self) -> Vec<&str> {
        self.rows
            .iter()
            .flatten()
            .map(|a| a.label.as_str())
            .collect()
    }
}

#[derive(Builder, Clone, Debug, PartialEq, Eq)]
#[builder(setter(into))]
pub struct TextMessage {
    pub text: String,
    #[builder(default, setter(strip_option))]
    pub keyboard: Option<Keyboard>,
    #[builder(default, setter(strip_option))]
    pub parse_mode: Option<ParseMode>,
}

impl TextMessage {
    pub fn builder() -> TextMessageBuilder {
        TextMessageBuilder::default()
    }
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: None,
            parse_mode: None,
        }
    }
}

/// Файл для отправки в чат
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    pub file_name: String,
    pub data: Vec<u8>,
}

/// Что показать в чате в ответ на команду
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reply {
    /// новое сообщение
    New(TextMessage),
    /// правка сообщения, с которого пришла команда
    Edited(TextMessage),
    /// новое сообщение и правка исходного (например, обновленное меню)
    NewAndEdited { new: TextMessage, edited: TextMessage },
    Document(Document),
}

/// Ответ сервиса меню. Отрисовку делает диспетчер.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MenuResponse {
    pub reply: Option<Reply>,
    /// всплывающий ответ на нажатие кнопки
    pub answer: Option<String>,
    /// удалить сообщение, с которого пришла команда
    pub delete_message: bool,
}

impl MenuResponse {
    pub fn empty() -> Self {
        Self::default()
    }
    pub fn send(message: TextMessage) -> Self {
        Self {
            reply: Some(Reply::New(message)),
            ..Self::default()
        }
    }
    pub fn edit(message: TextMessage) -> Self {
        Self {
            reply: Some(Reply::Edited(message)),
            ..Self::default()
        }
    }
    pub fn send_and_edit(new: TextMessage, edited: TextMessage) -> Self {
        Self {
            reply: Some(Reply::NewAndEdited { new, edited }),
            ..Self::default()
        }
    }
    pub fn file(document: Document) -> Self {
        Self {
            reply: Some(Reply::Document(document)),
            ..Self::default()
        }
    }
    pub fn answer(text: impl Into<String>) -> Self {
        Self {
            answer: Some(text.into()),
            ..Self::default()
        }
    }
    pub fn delete() -> Self {
        Self {
            delete_message: true,
            ..Self::default()
        }
    }
    pub fn is_empty(&self) -> bool {
        self.reply.is_none() && self.answer.is_none() && !self.delete_message
    }
    pub fn new_message(&self) -> Option<&TextMessage> {
        match &self.reply {
            Some(Reply::New(m)) | Some(Reply::NewAndEdited { new: m, .. }) => Some(m),
            _ => None,
        }
    }
    pub fn edited_message(&self) -> Option<&TextMessage> {
        match &self.reply {
            Some(Reply::Edited(m)) | Some(Reply::NewAndEdited { edited: m, .. }) => Some(m),
            _ => None,
        }
    }
    pub fn document(&self) -> Option<&Document> {
        match &self.reply {
            Some(Reply::Document(d)) => Some(d),
            _ => None,
        }
    }
}
