mod test_router_signaling;
