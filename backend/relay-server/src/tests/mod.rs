mod emojis;
