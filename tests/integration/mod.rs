mod image_integration;
mod text_and_path_integration;
