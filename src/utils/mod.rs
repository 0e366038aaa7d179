pub mod password;
pub mod slug;
pub mod url_validator;

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};

/// 生成会话令牌：32 字节随机数，URL 安全 base64 编码（无填充）
pub fn generate_session_token() -> String {
    let bytes: [u8; 32] = rand::random();
    URL_SAFE_NO_PAD.encode(bytes)
}
