use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// イーサネットヘッダー(14バイト)を含められない長さのフレーム
    #[error("invalid header: フレーム長 {length} バイトはイーサネットヘッダーに足りません")]
    MalformedHeader { length: usize },
}

#[derive(Error, Debug)]
pub enum InitProcessError {
    #[error("ロガーのセットアップに失敗しました: {0}")]
    LoggerError(String),

    #[error("環境変数の解析に失敗しました: {0}")]
    EnvVarParseError(String),

    #[error("入力の読み込みに失敗しました: {0}")]
    InputReadError(#[from] std::io::Error),

    #[error("出力のシリアライズに失敗しました: {0}")]
    OutputError(#[from] serde_json::Error),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum InputError {
    #[error("空の行です")]
    EmptyLine,

    #[error("フィールド数が不正です: {0} (1または3)")]
    FieldCount(usize),

    #[error("タイムスタンプの形式が不正です: {0}")]
    Timestamp(String),

    #[error("元のパケット長が不正です: {0}")]
    OriginalLength(String),

    #[error("Base64のデコードに失敗しました: {0}")]
    Base64(String),

    #[error("パケットが大きすぎます: {0} バイト")]
    TooLarge(usize),
}
