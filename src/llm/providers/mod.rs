mod claude;
mod gemini;
mod openai;
mod shared;
