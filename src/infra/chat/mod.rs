pub mod http_chat_service;
